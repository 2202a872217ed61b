use crate::commands::{CmdResult, PageInfo};
use crate::error::Result;
use crate::remote::RemoteStore;

pub fn run<S: RemoteStore>(store: &S, page: usize, page_size: usize) -> Result<CmdResult> {
    let page = page.max(1);
    let medicines = store.list_medicines(page, page_size)?;

    // A completely full page is the only hint that more may follow.
    let has_more = medicines.len() == page_size;

    Ok(CmdResult::default()
        .with_listed(medicines)
        .with_page(PageInfo { page, has_more }))
}

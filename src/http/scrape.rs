//! The scrape stub (C5), spec §4.5: always the fixed 404 reply, no
//! behavior beyond that.

use super::reply::not_found_reply;

#[must_use]
pub fn handle() -> Vec<u8> {
    not_found_reply()
}

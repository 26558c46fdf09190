//! External-facing glue: fetch the test-definition payload and publish
//! it to the dispatch queue, producing the correlation id the status
//! poller tracks.

pub mod dispatcher;
pub mod fetch;

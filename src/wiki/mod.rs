// MediaWiki API access — page search, revision fetching, source trait.

pub mod client;
pub mod revisions;
pub mod traits;

//! Readme discovery in a repository's root directory

use crate::bitbucket::pages::PageWalker;
use crate::bitbucket::types::DirEntry;
use crate::bitbucket::urls::RepoIdentity;
use crate::core::SourceResult;
use crate::di::JsonFetcher;
use tracing::debug;

/// Lower-cased file names recognised as a readme
pub const README_FILENAMES: [&str; 9] = [
    "readme",
    "readme.txt",
    "readme.md",
    "readme.mkd",
    "readme.mdown",
    "readme.markdown",
    "readme.textile",
    "readme.creole",
    "readme.rst",
];

pub fn is_readme(path: &str) -> bool {
    README_FILENAMES.contains(&path.to_lowercase().as_str())
}

/// Raw URL of the first readme in the root listing of `branch`.
///
/// Entries are checked in listing order. A 404 anywhere in the listing walk
/// means "no readme"; every other failure is returned.
pub async fn find_readme(
    fetcher: &dyn JsonFetcher,
    identity: &RepoIdentity,
    branch: &str,
    prefer_cached: bool,
) -> SourceResult<Option<String>> {
    let mut walker =
        PageWalker::<DirEntry>::new(fetcher, identity.listing_api_url(branch), prefer_cached);

    loop {
        let page = match walker.next_page().await {
            Ok(Some(page)) => page,
            Ok(None) => return Ok(None),
            Err(e) if e.is_not_found() => {
                debug!(repo = %identity, branch, error = %e, "no directory listing, skipping readme");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if let Some(entry) = page.into_iter().find(|entry| is_readme(&entry.path)) {
            return Ok(Some(identity.raw_url(branch, &entry.path)));
        }
    }
}

//! Bitbucket URL recognition and construction

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use urlencoding::{decode, encode};

const WEB_ROOT: &str = "https://bitbucket.org";
const API_ROOT: &str = "https://api.bitbucket.org/2.0/repositories";

static TAGS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://bitbucket\.org/([^/#?]+)/([^/#?]+)/?#tags$")
        .expect("tags URL pattern is valid")
});

static BRANCH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://bitbucket\.org/([^/#?]+)/([^/#?]+)/src/([^/#?]+)/?$")
        .expect("branch URL pattern is valid")
});

static REPO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://bitbucket\.org/([^/#?]+)/([^/#?]+)/?$")
        .expect("repository URL pattern is valid")
});

/// Owner and name of a Bitbucket repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// API endpoint for this repository with `suffix` appended verbatim
    pub fn api_url(&self, suffix: &str) -> String {
        format!("{}/{}/{}{}", API_ROOT, self.owner, self.repo, suffix)
    }

    pub fn repository_api_url(&self) -> String {
        self.api_url("")
    }

    pub fn tags_api_url(&self) -> String {
        self.api_url("/refs/tags?pagelen=100")
    }

    pub fn branch_api_url(&self, branch: &str) -> String {
        self.api_url(&format!("/refs/branches/{}", branch))
    }

    /// Root directory listing of `branch`
    pub fn listing_api_url(&self, branch: &str) -> String {
        self.api_url(&format!("/src/{}/?pagelen=100", branch))
    }

    fn web_base(&self) -> String {
        format!("{}/{}/{}", WEB_ROOT, encode(&self.owner), encode(&self.repo))
    }

    pub fn web_url(&self) -> String {
        self.web_base()
    }

    pub fn tags_web_url(&self) -> String {
        format!("{}#tags", self.web_base())
    }

    pub fn branch_web_url(&self, branch: &str) -> String {
        format!("{}/src/{}", self.web_base(), encode(branch))
    }

    pub fn issues_url(&self) -> String {
        format!("{}/issues", self.web_base())
    }

    /// Zip archive of a tag or branch
    pub fn zip_url(&self, reference: &str) -> String {
        format!("{}/get/{}.zip", self.web_base(), reference)
    }

    /// Raw contents of `path` on `branch`
    pub fn raw_url(&self, branch: &str, path: &str) -> String {
        format!("{}/raw/{}/{}", self.web_base(), branch, path)
    }
}

/// A recognised Bitbucket URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoUrl {
    /// `https://bitbucket.org/{owner}/{repo}#tags`
    Tags(RepoIdentity),
    /// `https://bitbucket.org/{owner}/{repo}` or `.../src/{branch}`
    Branch {
        identity: RepoIdentity,
        branch: Option<String>,
    },
}

impl RepoUrl {
    /// Match `url` against the accepted URL shapes.
    ///
    /// Returns `None` for anything that is not a Bitbucket repository URL.
    pub fn parse(url: &str) -> Option<Self> {
        if let Some(caps) = TAGS_URL.captures(url) {
            return Some(RepoUrl::Tags(captured_identity(&caps)?));
        }

        if let Some(caps) = BRANCH_URL.captures(url) {
            return Some(RepoUrl::Branch {
                identity: captured_identity(&caps)?,
                branch: Some(caps[3].to_string()),
            });
        }

        let caps = REPO_URL.captures(url)?;
        Some(RepoUrl::Branch {
            identity: captured_identity(&caps)?,
            branch: None,
        })
    }

    pub fn identity(&self) -> &RepoIdentity {
        match self {
            RepoUrl::Tags(identity) => identity,
            RepoUrl::Branch { identity, .. } => identity,
        }
    }

    /// Explicit branch named by the URL, if any
    pub fn branch(&self) -> Option<&str> {
        match self {
            RepoUrl::Tags(_) => None,
            RepoUrl::Branch { branch, .. } => branch.as_deref(),
        }
    }
}

/// Owner and repository from the first two groups, with escapes decoded
fn captured_identity(caps: &regex::Captures<'_>) -> Option<RepoIdentity> {
    let owner = decode(&caps[1]).ok()?;
    let repo = decode(&caps[2]).ok()?;
    Some(RepoIdentity::new(owner, repo))
}

/// Parse a bare repository URL (no branch, no tags marker)
fn bare_repo(repo_url: &str) -> Option<RepoIdentity> {
    captured_identity(&REPO_URL.captures(repo_url)?)
}

/// Web URL of the repository `owner/repo`
pub fn make_repo_url(owner: &str, repo: &str) -> String {
    RepoIdentity::new(owner, repo).web_url()
}

/// Tags page for a bare repository URL, `None` for any other URL
pub fn make_tags_url(repo_url: &str) -> Option<String> {
    bare_repo(repo_url).map(|identity| identity.tags_web_url())
}

/// Branch page for a bare repository URL, `None` for any other URL
pub fn make_branch_url(repo_url: &str, branch: &str) -> Option<String> {
    bare_repo(repo_url).map(|identity| identity.branch_web_url(branch))
}

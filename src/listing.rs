use crate::models::post::Post;

/// Active filter of a listing: everything, or one derived slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Slug(String),
}

impl Filter {
    /// Parse the `filter` query parameter. Absent, empty, or "all" → All.
    pub fn parse(raw: Option<&str>) -> Filter {
        match raw {
            None => Filter::All,
            Some(s) if s.trim().is_empty() || s.eq_ignore_ascii_case("all") => Filter::All,
            Some(s) => Filter::Slug(s.to_string()),
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Filter::All => None,
            Filter::Slug(s) => Some(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Fixed page size, "load more" window. The size never changes for the
    /// lifetime of the instance — the newly-revealed slice arithmetic
    /// depends on it.
    Paged { page_size: usize },
    /// Fixed small count, no pagination controls at all.
    Preview { count: usize },
}

/// Filter + pagination state of one card grid.
#[derive(Debug, Clone)]
pub struct Listing {
    pub filter: Filter,
    /// 1-based. Page n shows the window `[0, n * page_size)`.
    pub page: usize,
    mode: Mode,
}

impl Listing {
    pub fn paged(page_size: usize, filter: Filter, page: usize) -> Self {
        Listing {
            filter,
            page: page.max(1),
            mode: Mode::Paged {
                page_size: page_size.max(1),
            },
        }
    }

    pub fn preview(count: usize) -> Self {
        Listing {
            filter: Filter::All,
            page: 1,
            mode: Mode::Preview { count },
        }
    }

    pub fn is_preview(&self) -> bool {
        matches!(self.mode, Mode::Preview { .. })
    }

    pub fn page_size(&self) -> usize {
        match self.mode {
            Mode::Paged { page_size } => page_size,
            Mode::Preview { count } => count,
        }
    }

    /// Changing the filter always rewinds to the first page.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn load_more(&mut self) {
        self.page += 1;
    }

    /// The filtered subsequence, relative order preserved.
    pub fn filtered<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        match &self.filter {
            Filter::All => posts.iter().collect(),
            Filter::Slug(slug) => posts.iter().filter(|p| p.matches_slug(slug)).collect(),
        }
    }

    /// The visible window `[0, page * page_size)` of the filtered set
    /// (`[0, count)` in preview mode), clamped to the filtered length.
    pub fn visible<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let mut filtered = self.filtered(posts);
        let end = match self.mode {
            Mode::Paged { page_size } => self.page.saturating_mul(page_size),
            Mode::Preview { count } => count,
        };
        filtered.truncate(end.min(filtered.len()));
        filtered
    }

    /// The slice revealed by the current page only:
    /// `[(page-1) * page_size, page * page_size)`. This is what the load-more
    /// fragment returns so the client appends instead of re-rendering.
    pub fn newly_revealed<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let filtered = self.filtered(posts);
        let size = self.page_size();
        let start = (self.page - 1).saturating_mul(size).min(filtered.len());
        let end = self.page.saturating_mul(size).min(filtered.len());
        filtered[start..end].to_vec()
    }

    /// Whether a load-more control applies: never in preview mode, and only
    /// while the window does not yet cover the full filtered set.
    pub fn has_more(&self, posts: &[Post]) -> bool {
        match self.mode {
            Mode::Preview { .. } => false,
            Mode::Paged { page_size } => {
                self.page.saturating_mul(page_size) < self.filtered(posts).len()
            }
        }
    }
}

//! The page a clicked fish navigates to.

use std::fs;
use std::path::{Path, PathBuf};

use ratatui::{
    Frame,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};
use shoal_core::Navigator;
use tracing::{info, warn};

/// What loading a page produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Text(String),
    Unavailable(String),
}

/// A page opened from a relative link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Link as the fish carried it.
    pub link: String,
    /// Where the link resolved on disk.
    pub path: PathBuf,
    pub content: PageContent,
    /// Lines scrolled past the top.
    scroll: u16,
}

impl Page {
    /// Resolve `link` against `site_root` and read it.
    pub fn load(site_root: &Path, link: &str) -> Self {
        let path = site_root.join(link.trim_start_matches('/'));
        let content = match fs::read_to_string(&path) {
            Ok(text) => PageContent::Text(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "page could not be opened");
                PageContent::Unavailable(format!("{} could not be opened: {e}", path.display()))
            }
        };
        Self {
            link: link.to_string(),
            path,
            content,
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Render the page over the whole frame.
    pub fn render(&self, frame: &mut Frame) {
        let help = Line::from(vec![
            " b".bold(),
            " back  ".dark_gray(),
            "↑↓".bold(),
            " scroll  ".dark_gray(),
            "q".bold(),
            " quit ".dark_gray(),
        ]);
        let block = Block::bordered()
            .title(format!(" {} ", self.link))
            .title_bottom(help.right_aligned());

        let paragraph = match &self.content {
            PageContent::Text(text) => Paragraph::new(text.as_str()),
            PageContent::Unavailable(reason) => {
                Paragraph::new(reason.as_str()).style(Style::new().red())
            }
        };
        frame.render_widget(
            paragraph
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            frame.area(),
        );
    }
}

/// Navigator that opens pages from a local site directory.
#[derive(Debug)]
pub struct PageNavigator<'a> {
    site_root: &'a Path,
    opened: Option<Page>,
}

impl<'a> PageNavigator<'a> {
    pub fn new(site_root: &'a Path) -> Self {
        Self {
            site_root,
            opened: None,
        }
    }

    /// The page opened by the last navigation, if any.
    pub fn into_page(self) -> Option<Page> {
        self.opened
    }
}

impl Navigator for PageNavigator<'_> {
    fn navigate(&mut self, link: &str) {
        info!(link, root = %self.site_root.display(), "navigating");
        self.opened = Some(Page::load(self.site_root, link));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_existing_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("blog/post1.html"), "hello reef").unwrap();

        let page = Page::load(dir.path(), "blog/post1.html");
        assert_eq!(page.content, PageContent::Text("hello reef".to_string()));
        assert_eq!(page.path, dir.path().join("blog/post1.html"));
    }

    #[test]
    fn test_missing_page_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let page = Page::load(dir.path(), "/blog/post1.html");
        assert!(matches!(page.content, PageContent::Unavailable(_)));
        assert_eq!(page.path, dir.path().join("blog/post1.html"));
    }

    #[test]
    fn test_scroll_saturates() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = Page::load(dir.path(), "x.html");
        page.scroll_up();
        assert_eq!(page.scroll(), 0);
        page.scroll_down();
        page.scroll_down();
        assert_eq!(page.scroll(), 2);
    }

    #[test]
    fn test_navigator_opens_one_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut navigator = PageNavigator::new(dir.path());
        navigator.navigate("blog/post1.html");
        let page = navigator.into_page().unwrap();
        assert_eq!(page.link, "blog/post1.html");
    }
}

//! Plain-text render adapter.

use std::io::Write;

use gamehub_catalog::{Disposition, PageView, PagerItem, PagerLayout, RenderAdapter, ThumbnailTracker};
use gamehub_notify::Notice;
use gamehub_protocol::Category;
use gamehub_protocol::constants::GAME_SHELL_PATH;

/// Writes the catalog as text to any writer.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints the sticky site banner.
    pub fn render_banner(&mut self, banner: &Notice) {
        let _ = writeln!(self.out, "*** [{}] {} ***", banner.kind, banner.message);
    }
}

impl<W: Write> RenderAdapter for TextRenderer<W> {
    fn render_categories(&mut self, categories: &[Category], selected: &str) {
        let cards: Vec<String> = categories
            .iter()
            .map(|c| {
                if c.id.eq_ignore_ascii_case(selected) {
                    format!("[{} {}]", c.icon, c.display_name)
                } else {
                    format!("{} {}", c.icon, c.display_name)
                }
            })
            .collect();
        let _ = writeln!(self.out, "Categories: {}", cards.join("  "));
    }

    fn render_game_page(&mut self, view: &PageView<'_>, thumbnails: &ThumbnailTracker) {
        let search = if view.query.is_empty() {
            String::new()
        } else {
            format!(", search {:?}", view.query)
        };
        let _ = writeln!(
            self.out,
            "-- {}{} -- {} game(s), page {}/{}",
            view.category, search, view.total_matches, view.page, view.total_pages
        );

        if view.games.is_empty() {
            let _ = writeln!(self.out, "   (no games)");
            return;
        }

        for game in &view.games {
            let failed = if thumbnails.is_failed(game.id) {
                " [failed]"
            } else {
                ""
            };
            let _ = writeln!(
                self.out,
                "  #{:<5} {:<32} {:<12} {}{}",
                game.id,
                game.name,
                game.category().unwrap_or("-"),
                thumbnails.src_for(game),
                failed
            );
        }
    }

    fn render_pager(&mut self, layout: &PagerLayout) {
        if layout.is_single_page() {
            return;
        }

        // Disabled arrows are left out.
        let parts: Vec<String> = layout
            .items
            .iter()
            .filter_map(|item| match *item {
                PagerItem::Prev { enabled, .. } => enabled.then(|| "<".to_string()),
                PagerItem::Next { enabled, .. } => enabled.then(|| ">".to_string()),
                PagerItem::Number { page, current: true } => Some(format!("[{page}]")),
                PagerItem::Number { page, .. } => Some(page.to_string()),
                PagerItem::Ellipsis => Some("...".to_string()),
            })
            .collect();
        let _ = writeln!(self.out, "   {}", parts.join(" "));
    }

    fn render_launch(&mut self, disposition: &Disposition<'_>) {
        match disposition {
            Disposition::RoutedNavigate { slug } => {
                let _ = writeln!(self.out, ">> /game/{slug}");
            }
            Disposition::Redirect { url } => {
                let _ = writeln!(self.out, ">> navigating to {url}");
            }
            Disposition::Embed {
                game,
                recommendations,
            } => {
                let _ = writeln!(
                    self.out,
                    ">> playing {} in {GAME_SHELL_PATH} (src: {})",
                    game.name, game.url
                );
                if !recommendations.is_empty() {
                    let names: Vec<String> = recommendations
                        .iter()
                        .map(|g| format!("#{} {}", g.id, g.name))
                        .collect();
                    let _ = writeln!(self.out, "   you may also like: {}", names.join(", "));
                }
            }
        }
    }

    fn render_notice(&mut self, notice: &Notice) {
        let _ = writeln!(self.out, "[{}] {}", notice.kind, notice.message);
    }
}

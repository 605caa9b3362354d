//! Catalog store: the single owner of the game list and the view state.
//!
//! Every intent runs to completion (state update, recompute, render)
//! before the next one is accepted; `&mut self` enforces that.

use std::num::NonZeroUsize;

use gamehub_notify::{Notice, NoticeBoard};
use gamehub_protocol::constants::DEFAULT_PAGE_SIZE;
use gamehub_protocol::{ALL_CATEGORY_ID, CATEGORIES, Category, Game};
use tracing::{debug, warn};

use crate::error::{CatalogError, LaunchError};
use crate::filter::filter_indices;
use crate::launch::{Disposition, GameRouter, resolve_launch};
use crate::pager::{PagerLayout, clamp_page, compute_page, total_pages};
use crate::source::{GameSource, load_games};
use crate::thumbnails::ThumbnailTracker;

/// Static catalog settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    pub page_size: NonZeroUsize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// The mutable part of the catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected_category: String,
    pub search_query: String,
    /// 1-based; always within the valid page range.
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_category: ALL_CATEGORY_ID.to_owned(),
            search_query: String::new(),
            current_page: 1,
        }
    }
}

/// Where the one-shot catalog load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(String),
}

/// What the render adapter is asked to draw for the game grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub category: &'a str,
    pub query: &'a str,
    pub games: Vec<&'a Game>,
    pub page: usize,
    pub total_pages: usize,
    /// Size of the whole filtered set, not just this page.
    pub total_matches: usize,
}

/// Front-end side of the catalog.
///
/// The store calls these after every state change. Implementations only
/// draw; they never mutate catalog state and report user actions back as
/// intents on the store.
pub trait RenderAdapter {
    /// Draws the category cards, highlighting `selected`.
    fn render_categories(&mut self, categories: &[Category], selected: &str);

    /// Draws the current page of games.
    fn render_game_page(&mut self, view: &PageView<'_>, thumbnails: &ThumbnailTracker);

    /// Draws the page controls.
    fn render_pager(&mut self, layout: &PagerLayout);

    /// Opens a game in the frame or navigates away.
    fn render_launch(&mut self, disposition: &Disposition<'_>);

    /// Shows a user-visible notice.
    fn render_notice(&mut self, notice: &Notice);
}

/// Owns the loaded games, the view state, and the render adapter.
pub struct CatalogStore<R: RenderAdapter> {
    config: CatalogConfig,
    games: Vec<Game>,
    /// Positions into `games`; always `filter_indices(games, category, query)`.
    filtered: Vec<usize>,
    state: ViewState,
    load_state: LoadState,
    thumbnails: ThumbnailTracker,
    notices: NoticeBoard,
    router: Option<Box<dyn GameRouter>>,
    renderer: R,
}

impl<R: RenderAdapter> CatalogStore<R> {
    /// Creates an empty, not yet loaded store.
    pub fn new(config: CatalogConfig, renderer: R) -> Self {
        Self {
            config,
            games: Vec::new(),
            filtered: Vec::new(),
            state: ViewState::default(),
            load_state: LoadState::Pending,
            thumbnails: ThumbnailTracker::new(),
            notices: NoticeBoard::new(),
            router: None,
            renderer,
        }
    }

    /// Registers a router; launches then hand off to it by slug.
    pub fn register_router(&mut self, router: Box<dyn GameRouter>) {
        self.router = Some(router);
    }

    /// Fetches the catalog from `source` and renders the first page.
    ///
    /// Only one load is allowed per store, successful or not.
    pub async fn load(&mut self, source: &dyn GameSource) -> Result<(), CatalogError> {
        if self.load_state != LoadState::Pending {
            return Err(CatalogError::AlreadyLoaded);
        }
        let result = load_games(source).await;
        self.complete_load(result)
    }

    /// Applies the outcome of the one-shot load.
    ///
    /// On failure the catalog stays empty, the store stays unusable for
    /// intents, and a "Could not load games" notice is shown.
    pub fn complete_load(
        &mut self,
        result: Result<Vec<Game>, CatalogError>,
    ) -> Result<(), CatalogError> {
        if self.load_state != LoadState::Pending {
            return Err(CatalogError::AlreadyLoaded);
        }

        match result {
            Ok(games) => {
                self.games = games;
                self.load_state = LoadState::Loaded;
                self.recompute_filter();
                self.renderer
                    .render_categories(CATEGORIES, &self.state.selected_category);
                self.render_page();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load games");
                self.load_state = LoadState::Failed(e.to_string());
                self.notices.register_error("Could not load games");
                self.flush_notices();
                Err(e)
            }
        }
    }

    /// Selects a category and goes back to page 1.
    pub fn set_category(&mut self, category: &str) -> Result<(), CatalogError> {
        self.ensure_loaded()?;
        self.state.selected_category = category.to_owned();
        self.state.current_page = 1;
        self.recompute_filter();
        debug!(category, matches = self.filtered.len(), "category selected");

        self.renderer
            .render_categories(CATEGORIES, &self.state.selected_category);
        self.render_page();
        Ok(())
    }

    /// Sets the search text and goes back to page 1.
    ///
    /// Searching is always scoped to the selected category, so clearing the
    /// query restores that category's full set.
    pub fn set_search_query(&mut self, query: &str) -> Result<(), CatalogError> {
        self.ensure_loaded()?;
        self.state.search_query = query.to_owned();
        self.state.current_page = 1;
        self.recompute_filter();
        debug!(query, matches = self.filtered.len(), "search updated");

        self.render_page();
        Ok(())
    }

    /// Moves to page `page`, clamped into the valid range. Category and
    /// query are untouched.
    pub fn set_page(&mut self, page: usize) -> Result<(), CatalogError> {
        self.ensure_loaded()?;
        self.state.current_page = clamp_page(page, self.total_pages());
        debug!(page = self.state.current_page, "page changed");

        self.render_page();
        Ok(())
    }

    /// Opens game `id`.
    ///
    /// An unknown id shows a "Could not load game" notice and changes
    /// nothing. Before a successful load nothing is shown.
    pub fn launch(&mut self, id: u64) -> Result<(), LaunchError> {
        if self.ensure_loaded().is_err() {
            return Err(LaunchError::NotLoaded);
        }
        let disposition = match resolve_launch(&self.games, id, self.router.as_deref()) {
            Ok(d) => d,
            Err(e) => {
                warn!(id, "launch of unknown game");
                self.notices.register_error(format!("Could not load game #{id}"));
                self.flush_notices();
                return Err(e);
            }
        };

        debug!(id, ?disposition, "launching game");
        match (&disposition, self.router.as_deref()) {
            (Disposition::RoutedNavigate { slug }, Some(router)) => router.navigate_to_game(slug),
            _ => self.renderer.render_launch(&disposition),
        }
        Ok(())
    }

    /// Records a thumbnail load failure and redraws the page with the
    /// placeholder.
    pub fn mark_thumbnail_failed(&mut self, id: u64) {
        if self.thumbnails.mark_failed(id) && self.load_state == LoadState::Loaded {
            self.render_page();
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Every loaded game, in catalog order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// The filtered set for the current category and query.
    pub fn filtered_games(&self) -> Vec<&Game> {
        self.filtered.iter().map(|&i| &self.games[i]).collect()
    }

    /// The page currently on screen.
    pub fn current_view(&self) -> PageView<'_> {
        build_view(&self.games, &self.filtered, &self.state, self.config.page_size)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.config.page_size)
    }

    pub fn pager_layout(&self) -> PagerLayout {
        PagerLayout::new(self.state.current_page, self.total_pages())
    }

    pub fn thumbnails(&self) -> &ThumbnailTracker {
        &self.thumbnails
    }

    /// Notice board, e.g. for posting a site banner.
    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn ensure_loaded(&self) -> Result<(), CatalogError> {
        match self.load_state {
            LoadState::Loaded => Ok(()),
            _ => {
                debug!("intent ignored, catalog not loaded");
                Err(CatalogError::NotLoaded)
            }
        }
    }

    fn recompute_filter(&mut self) {
        self.filtered = filter_indices(
            &self.games,
            &self.state.selected_category,
            &self.state.search_query,
        );
        self.state.current_page = clamp_page(self.state.current_page, self.total_pages());
    }

    fn render_page(&mut self) {
        let view = build_view(&self.games, &self.filtered, &self.state, self.config.page_size);
        self.renderer.render_game_page(&view, &self.thumbnails);
        self.renderer
            .render_pager(&PagerLayout::new(view.page, view.total_pages));
        self.flush_notices();
    }

    fn flush_notices(&mut self) {
        for notice in self.notices.drain() {
            self.renderer.render_notice(&notice);
        }
    }
}

fn build_view<'a>(
    games: &'a [Game],
    filtered: &[usize],
    state: &'a ViewState,
    page_size: NonZeroUsize,
) -> PageView<'a> {
    let page = compute_page(filtered, page_size, state.current_page);
    PageView {
        category: &state.selected_category,
        query: &state.search_query,
        games: page.items.iter().map(|&i| &games[i]).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_matches: filtered.len(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::filter::compute_filtered_games;
    use crate::test_support::game;

    /// Records what the store asked to render.
    #[derive(Default)]
    struct RecordingRenderer {
        categories: Vec<String>,
        pages: Vec<(Vec<u64>, usize, usize)>,
        pagers: Vec<PagerLayout>,
        launches: Vec<String>,
        notices: Vec<String>,
    }

    impl RenderAdapter for RecordingRenderer {
        fn render_categories(&mut self, _categories: &[Category], selected: &str) {
            self.categories.push(selected.to_owned());
        }

        fn render_game_page(&mut self, view: &PageView<'_>, _thumbnails: &ThumbnailTracker) {
            let ids = view.games.iter().map(|g| g.id).collect();
            self.pages.push((ids, view.page, view.total_pages));
        }

        fn render_pager(&mut self, layout: &PagerLayout) {
            self.pagers.push(layout.clone());
        }

        fn render_launch(&mut self, disposition: &Disposition<'_>) {
            let label = match disposition {
                Disposition::RoutedNavigate { slug } => format!("route:{slug}"),
                Disposition::Redirect { url } => format!("redirect:{url}"),
                Disposition::Embed { game, .. } => format!("embed:{}", game.id),
            };
            self.launches.push(label);
        }

        fn render_notice(&mut self, notice: &Notice) {
            self.notices.push(notice.message.clone());
        }
    }

    struct RecordingRouter(Arc<Mutex<Vec<String>>>);

    impl GameRouter for RecordingRouter {
        fn navigate_to_game(&self, slug: &str) {
            self.0.lock().unwrap().push(slug.to_owned());
        }
    }

    fn catalog() -> Vec<Game> {
        vec![
            game(1, "Space Blaster", Some("action")),
            game(2, "Retro Racer", Some("racing")),
            game(3, "Turbo Race", Some("racing")),
            game(4, "Drift King", Some("racing")),
            game(5, "Block Drop", Some("puzzle")),
            game(6, "Race Maze", Some("puzzle")),
            game(7, "Racing Pup", Some("racing")),
        ]
    }

    fn loaded_store(page_size: usize) -> CatalogStore<RecordingRenderer> {
        let config = CatalogConfig {
            page_size: NonZeroUsize::new(page_size).unwrap(),
        };
        let mut store = CatalogStore::new(config, RecordingRenderer::default());
        store.complete_load(Ok(catalog())).unwrap();
        store
    }

    fn page_ids(store: &CatalogStore<RecordingRenderer>) -> Vec<u64> {
        store.current_view().games.iter().map(|g| g.id).collect()
    }

    #[test]
    fn load_renders_first_page_and_categories() {
        let store = loaded_store(3);
        let r = store.renderer();

        assert_eq!(store.load_state(), &LoadState::Loaded);
        assert_eq!(r.categories, vec!["all"]);
        assert_eq!(r.pages, vec![(vec![1, 2, 3], 1, 3)]);
        assert_eq!(r.pagers.len(), 1);
        assert_eq!(store.view_state(), &ViewState::default());
    }

    #[test]
    fn failed_load_reports_and_rejects_intents() {
        let mut store = CatalogStore::new(CatalogConfig::default(), RecordingRenderer::default());
        let result = store.complete_load(Err(CatalogError::Http("offline".into())));

        assert!(result.is_err());
        assert!(matches!(store.load_state(), LoadState::Failed(_)));
        assert!(store.games().is_empty());
        assert_eq!(store.renderer().notices, vec!["Could not load games"]);

        assert!(matches!(
            store.set_search_query("race"),
            Err(CatalogError::NotLoaded)
        ));
        assert!(matches!(store.set_page(2), Err(CatalogError::NotLoaded)));
        assert_eq!(store.view_state(), &ViewState::default());
        assert!(store.renderer().pages.is_empty());
    }

    #[test]
    fn intents_before_load_are_rejected() {
        let mut store = CatalogStore::new(CatalogConfig::default(), RecordingRenderer::default());
        assert!(matches!(
            store.set_category("racing"),
            Err(CatalogError::NotLoaded)
        ));
        assert_eq!(store.view_state().selected_category, "all");
    }

    #[test]
    fn second_load_is_rejected() {
        let mut store = loaded_store(3);
        assert!(matches!(
            store.complete_load(Ok(vec![])),
            Err(CatalogError::AlreadyLoaded)
        ));
        assert_eq!(store.games().len(), 7);
    }

    #[test]
    fn category_resets_page() {
        let mut store = loaded_store(2);
        store.set_page(3).unwrap();
        assert_eq!(store.view_state().current_page, 3);

        store.set_category("racing").unwrap();
        assert_eq!(store.view_state().current_page, 1);
        assert_eq!(page_ids(&store), vec![2, 3]);
        assert_eq!(store.total_pages(), 2);
        assert_eq!(store.renderer().categories.last().unwrap(), "racing");
    }

    #[test]
    fn search_resets_page_and_is_category_scoped() {
        let mut store = loaded_store(2);
        store.set_category("racing").unwrap();
        store.set_page(2).unwrap();

        store.set_search_query("ra").unwrap();
        assert_eq!(store.view_state().current_page, 1);
        let ids: Vec<u64> = store.filtered_games().iter().map(|g| g.id).collect();
        // "Race Maze" is puzzle and stays out.
        assert_eq!(ids, vec![2, 3, 4, 7]);
    }

    #[test]
    fn clearing_search_restores_category_set() {
        let mut store = loaded_store(50);
        store.set_category("racing").unwrap();
        store.set_search_query("turbo").unwrap();
        assert_eq!(store.filtered_games().len(), 1);

        store.set_search_query("").unwrap();
        let games = catalog();
        let expected: Vec<u64> = compute_filtered_games(&games, "racing", "")
            .iter()
            .map(|g| g.id)
            .collect();
        let ids: Vec<u64> = store.filtered_games().iter().map(|g| g.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(ids, vec![2, 3, 4, 7]);
    }

    #[test]
    fn set_page_clamps_and_keeps_filters() {
        let mut store = loaded_store(3);
        store.set_search_query("r").unwrap();
        let before = store.filtered_games().len();

        store.set_page(99).unwrap();
        assert_eq!(store.view_state().current_page, store.total_pages());
        store.set_page(0).unwrap();
        assert_eq!(store.view_state().current_page, 1);

        assert_eq!(store.view_state().search_query, "r");
        assert_eq!(store.filtered_games().len(), before);
    }

    #[test]
    fn unknown_category_shows_empty_page() {
        let mut store = loaded_store(3);
        store.set_category("arcade").unwrap();

        let view = store.current_view();
        assert!(view.games.is_empty());
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 1);
        assert!(store.renderer().notices.is_empty());
    }

    #[test]
    fn every_intent_renders_page_and_pager() {
        let mut store = loaded_store(3);
        store.set_category("racing").unwrap();
        store.set_search_query("x").unwrap();
        store.set_page(1).unwrap();

        let r = store.renderer();
        assert_eq!(r.pages.len(), 4);
        assert_eq!(r.pagers.len(), 4);
    }

    #[test]
    fn launch_embed_and_unknown() {
        let mut store = loaded_store(3);
        store.launch(5).unwrap();
        assert_eq!(store.renderer().launches, vec!["embed:5"]);

        let state_before = store.view_state().clone();
        assert_eq!(store.launch(404), Err(LaunchError::GameNotFound(404)));
        assert_eq!(store.renderer().launches.len(), 1);
        assert_eq!(store.renderer().notices, vec!["Could not load game #404"]);
        assert_eq!(store.view_state(), &state_before);
    }

    #[test]
    fn launch_before_or_after_failed_load_is_rejected() {
        let mut store = CatalogStore::new(CatalogConfig::default(), RecordingRenderer::default());
        assert_eq!(store.launch(1), Err(LaunchError::NotLoaded));
        assert!(store.renderer().notices.is_empty());

        let failed = std::io::Error::new(std::io::ErrorKind::NotFound, "games.json");
        assert!(store.complete_load(Err(failed.into())).is_err());
        assert_eq!(store.launch(1), Err(LaunchError::NotLoaded));
        assert_eq!(store.renderer().notices, vec!["Could not load games"]);
        assert!(store.renderer().launches.is_empty());
    }

    #[test]
    fn launch_goes_through_router_when_registered() {
        let mut store = loaded_store(3);
        let routed = Arc::new(Mutex::new(Vec::new()));
        store.register_router(Box::new(RecordingRouter(Arc::clone(&routed))));

        store.launch(2).unwrap();
        assert_eq!(*routed.lock().unwrap(), vec!["retro-racer"]);
        assert!(store.renderer().launches.is_empty());
    }

    #[test]
    fn thumbnail_failure_rerenders_once() {
        let mut store = loaded_store(3);
        let renders = store.renderer().pages.len();

        store.mark_thumbnail_failed(1);
        store.mark_thumbnail_failed(1);
        assert!(store.thumbnails().is_failed(1));
        assert_eq!(store.renderer().pages.len(), renders + 1);
    }

    #[tokio::test]
    async fn load_from_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        std::fs::write(&path, serde_json::to_vec(&catalog()).unwrap()).unwrap();

        let mut store = CatalogStore::new(CatalogConfig::default(), RecordingRenderer::default());
        store
            .load(&crate::source::FileGameSource::new(&path))
            .await
            .unwrap();

        assert_eq!(store.games().len(), 7);
        assert_eq!(store.current_view().total_matches, 7);
        assert!(matches!(
            store
                .load(&crate::source::FileGameSource::new(&path))
                .await,
            Err(CatalogError::AlreadyLoaded)
        ));
    }
}

#![forbid(unsafe_code)]

//! A books-list scene: config is an [`Author`], data is the author's books.
//!
//! The model fetches synchronously from an in-memory [`Library`]. It emits
//! `Loading` when a fetch starts, `Error` when the author is unknown or the
//! library is set to fail, and `Data` whenever its book list is replaced.

use std::cell::Cell;
use std::collections::BTreeMap;

use scene_core::UiState;
use scene_runtime::{ModelCore, SceneHooks, SceneModel};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub year: u16,
}

impl Book {
    pub fn new(title: impl Into<String>, year: u16) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }
}

/// In-memory book source with injectable failures.
#[derive(Debug, Default)]
pub struct Library {
    shelves: BTreeMap<String, Vec<Book>>,
    failures_left: Cell<u32>,
}

impl Library {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A small fixed catalogue.
    #[must_use]
    pub fn sample() -> Self {
        let mut library = Self::new();
        library.shelve(
            "Ursula K. Le Guin",
            vec![
                Book::new("A Wizard of Earthsea", 1968),
                Book::new("The Left Hand of Darkness", 1969),
                Book::new("The Dispossessed", 1974),
            ],
        );
        library.shelve(
            "Octavia E. Butler",
            vec![
                Book::new("Kindred", 1979),
                Book::new("Parable of the Sower", 1993),
            ],
        );
        library
    }

    pub fn shelve(&mut self, author: impl Into<String>, books: Vec<Book>) {
        self.shelves.insert(author.into(), books);
    }

    /// Make the next `count` lookups fail.
    pub fn fail_next(&self, count: u32) {
        self.failures_left.set(count);
    }

    /// Books by `author`; `None` when unknown or when a failure is pending.
    pub fn lookup(&self, author: &str) -> Option<Vec<Book>> {
        let pending = self.failures_left.get();
        if pending > 0 {
            self.failures_left.set(pending - 1);
            return None;
        }
        self.shelves.get(author).cloned()
    }
}

/// Model of the books-list scene.
#[derive(Debug)]
pub struct BooksListModel {
    core: ModelCore<Author, Vec<Book>>,
    library: Library,
}

impl BooksListModel {
    #[must_use]
    pub fn new(author: Author, library: Library) -> Self {
        Self {
            core: ModelCore::new(Some(author), None),
            library,
        }
        .bound()
    }

    #[must_use]
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Fetch the configured author's books. Returns `true` on success.
    pub fn fetch(&self) -> bool {
        let Some(author) = self.core.config() else {
            warn!("fetch without an author");
            self.emit(UiState::Error);
            return false;
        };

        self.emit(UiState::Loading);
        match self.library.lookup(&author.name) {
            Some(books) => {
                info!(author = %author.name, count = books.len(), "books fetched");
                self.core.set_data(Some(books));
                true
            }
            None => {
                warn!(author = %author.name, "books unavailable");
                self.emit(UiState::Error);
                false
            }
        }
    }

    /// Fetch, then fetch again up to `retries` times while it fails.
    pub fn fetch_with_retries(&self, retries: u32) -> bool {
        if self.fetch() {
            return true;
        }
        for attempt in 1..=retries {
            info!(attempt, "retrying fetch");
            if self.fetch() {
                return true;
            }
        }
        false
    }
}

impl SceneModel for BooksListModel {
    type Config = Author;
    type Data = Vec<Book>;

    fn core(&self) -> &ModelCore<Author, Vec<Book>> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<Author, Vec<Book>> {
        &mut self.core
    }

    fn bind_subscriptions(&mut self) {
        let sink = self.core.sink();
        let sub = self.core.data_publisher().subscribe(move |books| {
            if let Some(books) = books {
                sink.emit(UiState::Data(books.clone()));
            }
        });
        self.core.subscriptions_mut().store(sub);
    }
}

/// Text view of the books list.
///
/// An autoloading view starts the model's fetch itself when the scene is
/// attached; a plain one waits for the caller to fetch.
#[derive(Debug, Default)]
pub struct BooksListView {
    status: String,
    rows: Vec<String>,
    frames: usize,
    autoload: Option<u32>,
}

impl BooksListView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A view that fetches on attach, retrying up to `retries` times.
    #[must_use]
    pub fn autoloading(retries: u32) -> Self {
        Self {
            autoload: Some(retries),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of `update_ui_elements` passes so far.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Status line followed by one line per book.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("[{}]", self.status);
        for row in &self.rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }
}

impl SceneHooks<BooksListModel> for BooksListView {
    fn on_state_initial(&mut self, model: &BooksListModel) {
        self.status = "ready".into();
        self.rows.clear();
        if let Some(retries) = self.autoload {
            model.fetch_with_retries(retries);
        }
    }

    fn on_state_loading(&mut self, _model: &BooksListModel) {
        self.status = "loading".into();
    }

    fn on_state_data(&mut self, _model: &BooksListModel, books: &Vec<Book>) {
        self.status = format!("{} books", books.len());
        self.rows = books
            .iter()
            .map(|book| format!("  {} ({})", book.title, book.year))
            .collect();
    }

    fn on_state_error(&mut self, _model: &BooksListModel) {
        self.status = "could not load books".into();
        self.rows.clear();
    }

    fn update_ui_elements(&mut self, _model: &BooksListModel, _state: &UiState<Vec<Book>>) {
        self.frames += 1;
    }
}

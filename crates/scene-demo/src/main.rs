#![forbid(unsafe_code)]

//! Scene demo binary entry point.

use scene_demo::books::{Author, BooksListModel, BooksListView, Library};
use scene_demo::cli;
use scene_runtime::{LayoutCatalog, Scene};
use tracing_subscriber::EnvFilter;

fn main() {
    let opts = cli::Opts::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&opts.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let library = Library::sample();
    library.fail_next(opts.fail_first);
    let model = BooksListModel::new(Author::new(opts.author.clone()), library);

    let retries = opts.retries;
    let catalog = LayoutCatalog::new()
        .with_layout("BooksListView", move || BooksListView::autoloading(retries));
    let Some(mut scene) = Scene::from_layout(&catalog, model) else {
        eprintln!("Failed to initialize: books list layout missing");
        std::process::exit(1);
    };

    // The view fetches from its initial hook, so attach runs the whole load.
    if let Err(e) = scene.attach() {
        eprintln!("Failed to attach: {e}");
        std::process::exit(1);
    }
    println!("{}", scene.view().render());

    if scene.state().is_error() {
        std::process::exit(2);
    }
}

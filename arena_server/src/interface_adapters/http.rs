// Static file fallback for the browser client. Not part of the simulation.

use std::path::Path;
use tower_http::services::ServeDir;

/// Serves files from `root`; directories resolve to their `index.html`.
pub fn static_files(root: &Path) -> ServeDir {
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "static root missing; every request will 404");
    }
    ServeDir::new(root).append_index_html_on_directories(true)
}

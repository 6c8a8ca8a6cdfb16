pub mod export_service;
pub mod export_service_impl;
pub use export_service::{EXPORT_FILENAME, ExportError, ExportService};
pub use export_service_impl::SeaOrmExportService;

pub mod list_service;
pub mod list_service_impl;
pub use list_service::{ListError, ListService, Upserted};
pub use list_service_impl::SeaOrmListService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::{MovieError, MovieService};
pub use movie_service_impl::SeaOrmMovieService;

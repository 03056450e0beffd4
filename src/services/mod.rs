pub mod flag_service;
pub mod raster_io;

pub use flag_service::FlagService;

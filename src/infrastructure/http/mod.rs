pub mod depot_client;

pub use depot_client::HttpDepotSource;

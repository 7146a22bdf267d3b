pub mod params;
pub mod record;
pub mod table;

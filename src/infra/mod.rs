pub mod mbta;

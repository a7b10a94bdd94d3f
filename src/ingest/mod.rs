/// Data acquisition clients for external providers.

pub mod openweather;

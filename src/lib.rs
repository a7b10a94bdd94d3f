/// Weather forecast acquisition & advisory pipeline.
///
/// The pipeline is {fetch → normalize → advise / persist / present}:
/// one blocking request to the OpenWeatherMap forecast API, normalization
/// into canonical records under a drop-don't-guess policy, a fixed-rule
/// activity advisory over the aggregate, and a full-overwrite write of the
/// record set into PostgreSQL. Stages run synchronously on the calling
/// thread; fetch and persist failures surface as typed errors, row drops
/// do not.

pub mod advisory;
pub mod config;
pub mod db;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod normalize;

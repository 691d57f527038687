pub mod decay;
pub mod errors;
pub mod observation;
pub mod timeseries;
pub mod utils;

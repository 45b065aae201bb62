pub mod calibration;
pub mod overrides;
pub mod params;
pub mod spot;
pub mod tier;

pub mod area;
pub mod region_risk;

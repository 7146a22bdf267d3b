pub mod stage1_normalize;
pub mod stage2_analyze;
pub mod stage3_report;

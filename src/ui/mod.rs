// UI module for the benchmark plot viewer
//
// - `viewer`: window showing the rendered chart, its summary and record table

pub mod viewer;

pub use viewer::show;

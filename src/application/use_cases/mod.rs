pub mod column_normalizer;
pub mod json_flattener;
pub mod missing_data;
pub mod processor;
pub mod profiler;
pub mod row_filter;
pub mod string_cleaner;

mod attribute_filter;

pub use attribute_filter::AttributeFilter;

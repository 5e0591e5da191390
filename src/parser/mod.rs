pub mod affected;
pub mod template;

pub use affected::AffectedTableParser;
pub use template::{render_blank_template, render_template, TemplateExtractor};

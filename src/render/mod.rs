pub mod style;
pub mod palette;
pub mod recency;
pub mod correlate;
pub mod assemble;

pub use assemble::{author_column_width, line_number_width, render_rows};
pub use palette::AuthorColorTable;
pub use recency::Recency;
pub use style::{Attr, Color, Style};

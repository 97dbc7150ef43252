use console::Style;
use once_cell::sync::Lazy;

pub struct TableStyles {
    pub header: Style,
    pub id: Style,
    pub name: Style,
    pub muted: Style,
    pub label: Style,
}

pub static TABLE_STYLES: Lazy<TableStyles> = Lazy::new(|| TableStyles {
    header: Style::new().bold().underlined(),
    id: Style::new().yellow(),
    name: Style::new().bold(),
    muted: Style::new().color256(246),
    label: Style::new().cyan(),
});

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

/// Multi-line character art rendered at a fixed position, clipped to the
/// given area. With `transparent` set, space characters leave the cells
/// underneath untouched.
#[derive(Debug, Default)]
pub struct Sprite {
    lines: Vec<String>,
    style: Style,
    transparent: bool,
}

impl Sprite {
    pub fn new(lines: Vec<String>) -> Self {
        Sprite { lines, style: Style::default(), transparent: false }
    }

    pub fn from_text(text: &str) -> Self {
        Sprite::new(text.lines().filter(|line| !line.is_empty()).map(|line| line.to_string()).collect())
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn size(&self) -> (u16, u16) {
        let width = self.lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
        (width, self.lines.len() as u16)
    }
}

impl Widget for Sprite {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, line) in self.lines.iter().enumerate() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }
            for (col, ch) in line.chars().enumerate() {
                let x = area.x + col as u16;
                if x >= area.right() {
                    break;
                }
                if self.transparent && ch == ' ' {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(ch);
                    cell.set_style(self.style);
                }
            }
        }
    }
}

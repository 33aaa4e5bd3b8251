pub mod background;
pub mod game;

/// Outer size of the bordered play area, in terminal cells. The world
/// (450x600 units) is projected onto the inner area.
pub const WIDTH: u16 = 92;
pub const HEIGHT: u16 = 47;

pub const TITLE_TEXT: &str = r#"
 ______ _
|  ____| |
| |__  | | __ _ _ __  _ __  _   _
|  __| | |/ _` | '_ \| '_ \| | | |
| |    | | (_| | |_) | |_) | |_| |
|_|    |_|\__,_| .__/| .__/ \__, |
               |_|   |_|    |___/
"#;

/// Drift speed of the cloud layer, in cells per second.
pub const CLOUD_SPEED: f32 = 3.0;

/// Clouds scattered over the sky, per 100 columns of width.
pub const CLOUD_DENSITY: f32 = 4.0;

pub const CLOUD_TEXTS: [&str; 3] = [
    r#"
   .--.
 .(    ).
(___(__.__)
"#,
    r#"
  .-.
 (   ).
(___(__)
"#,
    r#"
 _ -_
(__ _)
"#,
];

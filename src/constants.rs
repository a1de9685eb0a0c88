// Play-field geometry (world units; the display layer scales to the terminal)
pub const VIEW_WIDTH: f32 = 800.0;
pub const VIEW_HEIGHT: f32 = 600.0;
pub const BACKGROUND_WIDTH: f32 = 1600.0;

// Frame timing
pub const DEFAULT_FRAME_RATE: u32 = 30;

// Round flow
pub const MAGAZINE_SIZE: u32 = 8;
pub const COUNTDOWN_SECONDS: u32 = 3;
pub const DEFAULT_ROUND_SECONDS: u32 = 30;
pub const ROUND_LEAD_IN_SECONDS: u32 = 1;
/// Remaining seconds at or below which the clock is shown as a warning.
pub const WARNING_THRESHOLD: u32 = 10;

// Population caps
pub const MAX_FLOWERS: usize = 20;
pub const MAX_BIRDS: usize = 4;
pub const MAX_DARK_BIRDS: usize = 1;

// Spawn intervals (seconds)
pub const FLOWER_SPAWN_INTERVAL: f32 = 0.8;
pub const BIRD_SPAWN_INTERVAL: f32 = 0.5;
pub const DARK_BIRD_SPAWN_INTERVAL: f32 = 1.0;

// Motion (world units per second)
pub const BIRD_SPEED: f32 = 80.0;
pub const SCROLL_SPEED: f32 = 2.0 * BIRD_SPEED;
/// Width of the strip along each side of the view that scrolls the background.
pub const LOOK_EDGE_ZONE: f32 = 60.0;

// Sprite bounding boxes at scale 1.0
pub const BIRD_SIZE: (f32, f32) = (60.0, 40.0);
pub const DARK_BIRD_SIZE: (f32, f32) = (60.0, 40.0);
pub const FLOWER_SIZE: (f32, f32) = (36.0, 56.0);

pub const NORMAL_SCALE: f32 = 1.0;
pub const SMALL_SCALE: f32 = 0.6;

// Hit window half extents as fractions of the scaled sprite box
pub const NORMAL_HIT_FRACTION: (f32, f32) = (0.40, 0.40);
pub const SMALL_HIT_FRACTION: (f32, f32) = (0.55, 0.55);

// Falling sequence after a hit
pub const FALL_DURATION: f32 = 0.8;
pub const FALL_SPEED: f32 = 240.0;
pub const FALL_TURNS_PER_SECOND: f32 = 2.0;

// Vertical spawn bands (min, max)
pub const BIRD_BAND: (f32, f32) = (60.0, 300.0);
pub const DARK_BIRD_BAND: (f32, f32) = (60.0, 240.0);
pub const FLOWER_BAND: (f32, f32) = (440.0, 540.0);

// Horizontal margins, multiplied by entity scale
pub const SPAWN_MARGIN: f32 = 60.0;
pub const CULL_MARGIN: f32 = 120.0;

// Keyboard crosshair step
pub const CURSOR_KEY_STEP: f32 = 20.0;

/// How long a floating score label stays up.
pub const POPUP_SECONDS: f32 = 0.8;
/// Upward drift of a score label.
pub const POPUP_RISE_SPEED: f32 = 40.0;

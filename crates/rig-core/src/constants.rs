// Rig, tracker and intro tuning constants shared by the web and native frontends.

// Rotation limits (degrees)
pub const HEAD_YAW: f32 = 30.0;
pub const HEAD_PITCH: f32 = 18.0;
pub const NECK_YAW: f32 = 18.0;
pub const NECK_PITCH: f32 = 12.0;
pub const CHEST_YAW: f32 = 10.0;
pub const CHEST_PITCH: f32 = 6.0;
pub const EYE_OFFSET: f32 = 8.0;

// Clamp headroom on top of the nominal limits (degrees)
pub const HEAD_YAW_HEADROOM: f32 = 5.0; // lets jitter push past the nominal bound
pub const HEAD_PITCH_HEADROOM: f32 = 3.0;
pub const CHEST_YAW_HEADROOM: f32 = 2.0; // room for weight shift

// Shoulder counter-roll (degrees)
pub const SHOULDER_ROLL: f32 = 3.0;
pub const SHOULDER_ROLL_MAX: f32 = 5.0;

// Cursor-follow fractions, head to spine
pub const NECK_FOLLOW: f32 = 0.6;
pub const CHEST_FOLLOW: f32 = 0.4;
pub const SPINE_FOLLOW: f32 = 0.2;

// Per-frame smoothing rates at 60 FPS (lower = smoother)
pub const SMOOTHING_CURSOR: f32 = 0.08;
pub const SMOOTHING_HEAD: f32 = 0.12;
pub const SMOOTHING_NECK: f32 = 0.10;
pub const SMOOTHING_CHEST: f32 = 0.06;
pub const SMOOTHING_EYES: f32 = 0.15;
pub const SPINE_SMOOTHING_SCALE: f32 = 0.8; // relative to chest
pub const SHOULDER_SMOOTHING_SCALE: f32 = 0.5; // relative to chest

// Idle motion
pub const BREATHING_SPEED_HZ: f32 = 0.8;
pub const BREATHING_AMPLITUDE: f32 = 0.015; // uniform scale factor
pub const JITTER_FREQUENCY_HZ: f32 = 0.25;
pub const JITTER_AMPLITUDE_DEG: f32 = 0.8;
pub const JITTER_AXIS_OFFSET: f32 = 100.0; // decorrelates the Y jitter from X
pub const WEIGHT_SHIFT_SPEED_HZ: f32 = 0.15;
pub const WEIGHT_SHIFT_AMPLITUDE_DEG: f32 = 1.2;

// Frame clock
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // bounds the jump after a stall
pub const REFERENCE_FPS: f32 = 60.0; // smoothing rates are tuned per frame at this rate

// Input normalization
pub const TILT_RANGE_DEG: f32 = 45.0;
pub const TILT_BETA_NEUTRAL_DEG: f32 = 90.0; // phone held upright
pub const MOBILE_MAX_VIEWPORT_PX: u32 = 768;
pub const MOBILE_UA_MARKERS: [&str; 4] = ["iphone", "ipad", "ipod", "android"];

// Camera intro
pub const INTRO_DURATION_SEC: f32 = 2.2;
pub const INTRO_START_POS: [f32; 3] = [0.0, 0.2, 0.8]; // close-up
pub const INTRO_END_POS: [f32; 3] = [0.0, 0.1, 1.8]; // hero angle
pub const INTRO_START_FOV_DEG: f32 = 38.0;
pub const INTRO_END_FOV_DEG: f32 = 45.0;
pub const INTRO_MAX_ROLL_DEG: f32 = 2.0;

// Camera clip planes
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100_000.0;

// GUI reveal fallback if the intro never reports completion
pub const GUI_FALLBACK_TIMEOUT_SEC: f32 = 3.5;

// FPS averaging window (frames)
pub const FPS_WINDOW: usize = 60;

// Storage keys
pub const TASKS_STORAGE_KEY: &str = "dashboard-tasks";
pub const NOTES_STORAGE_KEY: &str = "calendar-notes";
pub const ALARMS_STORAGE_KEY: &str = "dashboard-alarms";

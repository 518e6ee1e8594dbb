//! Perspective camera description driven by the intro.
//!
//! Platform-free: front ends read the matrices (or the raw pose) and hand
//! them to whatever renderer draws the robot.

use crate::constants::{CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::intro::CameraPose;
use glam::{Mat4, Quat, Vec3};

/// Right-handed camera with perspective projection and a roll about its
/// viewing axis.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub roll_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera at `pose`, looking down -Z.
    pub fn from_pose(pose: &CameraPose, aspect: f32) -> Self {
        let mut cam = Self {
            eye: pose.position,
            target: pose.position - Vec3::Z,
            up: Vec3::Y,
            aspect,
            fovy_radians: pose.fov_deg.to_radians(),
            roll_radians: pose.roll_rad,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        cam.apply_pose(pose);
        cam
    }

    /// Move to `pose` keeping the viewing direction.
    pub fn apply_pose(&mut self, pose: &CameraPose) {
        let dir = self.forward();
        self.eye = pose.position;
        self.target = pose.position + dir;
        self.fovy_radians = pose.fov_deg.to_radians();
        self.roll_radians = pose.roll_rad;
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn forward(&self) -> Vec3 {
        let f = (self.target - self.eye).normalize_or_zero();
        if f == Vec3::ZERO {
            Vec3::NEG_Z
        } else {
            f
        }
    }

    /// Up vector after roll.
    pub fn rolled_up(&self) -> Vec3 {
        Quat::from_axis_angle(self.forward(), self.roll_radians) * self.up
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.rolled_up())
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// `[x, y, z, fov_deg, roll_rad]` for handing across an FFI boundary.
    pub fn state_array(&self) -> [f32; 5] {
        [
            self.eye.x,
            self.eye.y,
            self.eye.z,
            self.fovy_radians.to_degrees(),
            self.roll_radians,
        ]
    }
}

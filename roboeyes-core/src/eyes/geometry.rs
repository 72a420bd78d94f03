//! Per-eye geometry and tweening

/// One smoothing step toward `next` (floor of the average)
///
/// Repeated calls converge on `next` from above, and settle one pixel
/// short of it from below.
pub fn tween(current: i32, next: i32) -> i32 {
    // The floored mean of two i32 values always fits back into i32
    (i64::from(current) + i64::from(next)).div_euclid(2) as i32
}

/// Current and target geometry of one eye
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Eye {
    pub(crate) default_width: i32,
    pub(crate) default_height: i32,
    pub(crate) default_radius: i32,

    pub(crate) width: i32,
    pub(crate) width_next: i32,
    pub(crate) height: i32,
    pub(crate) height_next: i32,
    /// Extra height while curious, re-evaluated every frame
    pub(crate) height_offset: i32,
    pub(crate) radius: i32,
    pub(crate) radius_next: i32,

    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) x_next: i32,
    pub(crate) y_next: i32,

    /// Cleared by `close`, set by `open`
    pub(crate) open: bool,
}

impl Eye {
    /// New eye at `(x, y)`, collapsed to height 1 and opening toward its
    /// default height
    pub fn new(width: i32, height: i32, radius: i32, x: i32, y: i32) -> Self {
        Self {
            default_width: width,
            default_height: height,
            default_radius: radius,
            width,
            width_next: width,
            height: 1,
            height_next: height,
            height_offset: 0,
            radius,
            radius_next: radius,
            x,
            y,
            x_next: x,
            y_next: y,
            open: true,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Height the eye is tweening toward
    pub fn target_height(&self) -> i32 {
        self.height_next
    }

    pub fn target_x(&self) -> i32 {
        self.x_next
    }

    pub fn target_y(&self) -> i32 {
        self.y_next
    }

    pub fn default_width(&self) -> i32 {
        self.default_width
    }

    pub fn default_height(&self) -> i32 {
        self.default_height
    }

    pub fn default_radius(&self) -> i32 {
        self.default_radius
    }

    /// Whether the eye is flagged open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Tween height and keep the eye vertically centred on its row
    pub(crate) fn tween_height(&mut self) {
        self.height = tween(self.height + self.height_offset, self.height_next);
        self.y += (self.default_height - self.height).div_euclid(2);
        self.y -= self.height_offset.div_euclid(2);
    }

    /// Retarget a collapsed eye back to its default height
    pub(crate) fn reopen_if_closed(&mut self) {
        if self.open && self.height <= 1 + self.height_offset {
            self.height_next = self.default_height;
        }
    }

    pub(crate) fn tween_position(&mut self) {
        self.x = tween(self.x, self.x_next);
        self.y = tween(self.y, self.y_next);
    }

    pub(crate) fn close(&mut self) {
        self.height_next = 1;
        self.open = false;
    }

    /// Start a blink without touching the open flag
    pub(crate) fn squint(&mut self) {
        self.height_next = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_floors() {
        assert_eq!(tween(1, 36), 18);
        assert_eq!(tween(35, 36), 35);
        assert_eq!(tween(10, 9), 9);
        assert_eq!(tween(-3, 0), -2);
    }

    #[test]
    fn test_tween_extremes() {
        assert_eq!(tween(i32::MAX, i32::MAX), i32::MAX);
        assert_eq!(tween(i32::MIN, i32::MIN), i32::MIN);
        assert_eq!(tween(i32::MIN, i32::MAX), -1);
    }

    #[test]
    fn test_tween_converges() {
        let mut v = 0;
        for _ in 0..16 {
            v = tween(v, 36);
        }
        assert_eq!(v, 35);

        let mut v = 100;
        for _ in 0..16 {
            v = tween(v, 36);
        }
        assert_eq!(v, 36);
    }

    #[test]
    fn test_new_eye_opens() {
        let mut eye = Eye::new(36, 36, 8, 9, 14);
        assert_eq!(eye.height(), 1);
        assert_eq!(eye.target_height(), 36);
        assert!(eye.is_open());

        eye.tween_height();
        assert_eq!(eye.height(), 18);
        assert_eq!(eye.y(), 14 + 9);
    }

    #[test]
    fn test_reopen_only_when_open() {
        let mut eye = Eye::new(36, 36, 8, 9, 14);
        eye.close();
        eye.height = 1;
        eye.reopen_if_closed();
        assert_eq!(eye.target_height(), 1);

        eye.open = true;
        eye.reopen_if_closed();
        assert_eq!(eye.target_height(), 36);
    }

    #[test]
    fn test_curious_offset_raises_reopen_threshold() {
        let mut eye = Eye::new(36, 36, 8, 9, 14);
        eye.height = 9;
        eye.height_offset = 8;
        eye.squint();
        eye.reopen_if_closed();
        assert_eq!(eye.target_height(), 36);
    }
}

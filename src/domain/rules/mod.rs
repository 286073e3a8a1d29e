// Domain rules - Orientation and normalization policies

use crate::domain::model::*;
use crate::domain::timestamp::ClipTimestamp;

/// Distance between the overlay text and the right edge of the frame
pub const OVERLAY_RIGHT_MARGIN: u32 = 10;
pub const OVERLAY_COLOR: &str = "white";
pub const PAD_COLOR: &str = "black";

/// Business rules for deciding whether a clip is vertical
pub struct OrientationClassifier;

impl OrientationClassifier {
    /// Classify a clip from raw geometry and rotation metadata.
    ///
    /// Any one signal is enough: a taller-than-wide frame, a rotation of
    /// 90/270, or a display-matrix hint of 90/-90. 180 is never vertical.
    pub fn classify(width: u32, height: u32, rotation: i32, displaymatrix: i32) -> Orientation {
        let taller_than_wide = width < height;
        let rotated = matches!(rotation, 90 | 270);
        let matrix_rotated = matches!(displaymatrix, 90 | -90);

        if taller_than_wide || rotated || matrix_rotated {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Classify a probed stream, treating absent rotation metadata as 0
    pub fn classify_stream(stream: &VideoStreamInfo) -> Orientation {
        Self::classify(
            stream.width,
            stream.height,
            stream.rotation_degrees(),
            stream.displaymatrix_degrees(),
        )
    }
}

/// Builds the per-clip transform plan handed to the encode stage
pub struct TransformPlanner;

impl TransformPlanner {
    pub fn plan(
        orientation: Orientation,
        target: &TargetCanvas,
        timestamp: Option<&ClipTimestamp>,
    ) -> TransformPlan {
        let mut plan = TransformPlan::new();

        plan.push(TransformStep::NormalizeFramerate { fps: target.fps });
        plan.push(TransformStep::NormalizePixelAspect);

        if orientation.is_vertical() {
            Self::push_pillarbox(&mut plan, target);
        }

        if let Some(timestamp) = timestamp {
            Self::push_overlay(&mut plan, target, timestamp);
        }

        plan
    }

    /// Fit inside the canvas without cropping, then center on a black canvas
    fn push_pillarbox(plan: &mut TransformPlan, target: &TargetCanvas) {
        let (w, h) = (target.width, target.height);

        plan.push(TransformStep::SetDisplayAspect { num: 16, den: 9 });
        plan.push(TransformStep::Scale {
            width_expr: format!("min(iw*{}/ih,{})", h, w),
            height_expr: format!("min({},ih*{}/iw)", h, w),
        });
        plan.push(TransformStep::Pad {
            width: w,
            height: h,
            x_expr: "(ow-iw)/2".to_string(),
            y_expr: "(oh-ih)/2".to_string(),
            color: PAD_COLOR.to_string(),
        });
    }

    fn push_overlay(plan: &mut TransformPlan, target: &TargetCanvas, timestamp: &ClipTimestamp) {
        let style = &target.overlay;
        let x_expr = format!("w-text_w-{}", OVERLAY_RIGHT_MARGIN);
        let date_offset = style.font_size * 2 + style.padding;
        let time_offset = style.font_size + style.padding;

        plan.push(TransformStep::OverlayText {
            text: timestamp.date.to_string(),
            x_expr: x_expr.clone(),
            y_expr: format!("h-{}", date_offset),
            font_size: style.font_size,
            color: OVERLAY_COLOR.to_string(),
            until_seconds: style.duration_secs,
        });
        plan.push(TransformStep::OverlayText {
            text: timestamp.time.to_string(),
            x_expr,
            y_expr: format!("h-{}", time_offset),
            font_size: style.font_size,
            color: OVERLAY_COLOR.to_string(),
            until_seconds: style.duration_secs,
        });
    }
}

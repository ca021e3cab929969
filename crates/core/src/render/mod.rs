use std::f32::consts::{FRAC_PI_2, TAU};

use crate::{
    surface::{DrawSurface, LineCap, LineJoin, StrokeStyle},
    AnimationClock, Result, WaveMatchError, WaveOverrides, WaveParameters,
};

/// Fraction of the surface width reserved as a flat margin on the left.
const SPAN_LEFT_FRACTION: f32 = 0.025;
/// Fraction of the surface width the waveform is sampled across.
const SPAN_WIDTH_FRACTION: f32 = 0.95;

/// Logical surface geometry plus the derived horizontal span the waveform
/// occupies. Recomputed on every parameter update and resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    pub width: f32,
    pub height: f32,
    pub device_pixel_scale: f32,
    pub drawable_left: f32,
    pub drawable_width: f32,
}

impl SurfaceState {
    fn new(width: f32, height: f32, device_pixel_scale: f32) -> Result<Self> {
        check_dimension("surface_width", width)?;
        check_dimension("surface_height", height)?;
        check_dimension("device_pixel_scale", device_pixel_scale)?;
        Ok(Self {
            width,
            height,
            device_pixel_scale,
            drawable_left: width * SPAN_LEFT_FRACTION,
            drawable_width: width * SPAN_WIDTH_FRACTION,
        })
    }

    fn recompute_span(&mut self) {
        self.drawable_left = self.width * SPAN_LEFT_FRACTION;
        self.drawable_width = self.width * SPAN_WIDTH_FRACTION;
    }
}

fn check_dimension(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WaveMatchError::invalid(name, format!("{value} must be positive")))
    }
}

/// Periodic easing envelope: 0 at both ends of the span, `amplitude` at the
/// midpoint. Tapers the wave toward the surface edges instead of clipping
/// it. The `π/2` phase shift is load-bearing for the boundary values.
pub fn ease(percent: f32, amplitude: f32) -> f32 {
    amplitude * ((percent * TAU - FRAC_PI_2).sin() + 1.0) * 0.5
}

/// Renders one horizontal sine waveform per tick across an exclusively
/// owned drawing surface.
///
/// The phase advances through an internal [`AnimationClock`] unless an
/// explicit time is supplied, which keeps frames reproducible in tests and
/// lets the host scrub the animation.
#[derive(Debug)]
pub struct WaveRenderer<S: DrawSurface> {
    surface: S,
    state: SurfaceState,
    params: WaveParameters,
    clock: AnimationClock,
}

impl<S: DrawSurface> WaveRenderer<S> {
    /// Takes ownership of `surface`, scales its backing store by
    /// `device_pixel_scale` while keeping the logical coordinate space at
    /// `width` by `height`, and applies `overrides` (defaults when `None`).
    pub fn new(
        mut surface: S,
        width: f32,
        height: f32,
        device_pixel_scale: f32,
        overrides: Option<WaveOverrides>,
    ) -> Result<Self> {
        let state = SurfaceState::new(width, height, device_pixel_scale)?;
        surface.resize_backing(width, height, device_pixel_scale);

        let mut renderer = Self {
            surface,
            state,
            params: WaveParameters::default(),
            clock: AnimationClock::new(),
        };
        renderer.set_parameters(overrides)?;
        Ok(renderer)
    }

    /// Replaces the wave parameters wholesale: supplied fields overlay the
    /// documented defaults, absent fields reset to them. Also recomputes
    /// the drawable span.
    pub fn set_parameters(&mut self, overrides: Option<WaveOverrides>) -> Result<()> {
        let params = overrides
            .map(|o| o.apply_over_defaults())
            .unwrap_or_default();
        params.validate()?;
        self.params = params;
        self.state.recompute_span();
        Ok(())
    }

    /// Adopts new logical surface dimensions and rescales the backing store.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_scale: f32) -> Result<()> {
        self.state = SurfaceState::new(width, height, device_pixel_scale)?;
        self.surface
            .resize_backing(width, height, device_pixel_scale);
        Ok(())
    }

    /// Erases the full logical surface region.
    pub fn clear(&mut self) {
        self.surface.clear(self.state.width, self.state.height);
    }

    /// Advances the internal clock and draws one frame. When
    /// `explicit_time` is given it is used instead of the clock value; the
    /// clock still advances so implicit ticking resumes seamlessly.
    pub fn tick(&mut self, explicit_time: Option<f32>) {
        let internal = self.clock.advance();
        let time = explicit_time.unwrap_or(internal);
        self.draw_waveform(time * self.params.time_modifier);
    }

    /// Clears the surface and draws the next frame.
    pub fn render(&mut self) {
        self.clear();
        self.tick(None);
    }

    /// Clears the surface and flushes any in-progress path.
    pub fn dispose(&mut self) {
        self.clear();
        self.surface.end_path();
    }

    pub fn parameters(&self) -> &WaveParameters {
        &self.params
    }

    pub fn surface_state(&self) -> &SurfaceState {
        &self.state
    }

    /// Current internal clock value.
    pub fn time(&self) -> f32 {
        self.clock.current()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Releases the renderer and hands the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn draw_waveform(&mut self, time: f32) {
        // Defensive stride fallback; validation rejects zero upstream.
        let stride = if self.params.segment_length == 0.0 {
            0.1
        } else {
            self.params.segment_length
        };
        let y_axis = self.state.height / 2.0;
        let style = StrokeStyle {
            line_width: self.params.line_width,
            color: self.params.stroke_color.clone(),
            cap: LineCap::Round,
            join: LineJoin::Round,
        };

        self.surface.begin_path();
        self.surface.move_to(0.0, y_axis);
        self.surface.line_to(self.state.drawable_left, y_axis);

        let mut i = 0.0_f32;
        while i < self.state.drawable_width {
            let x = time * self.params.speed + (-y_axis + i) / self.params.wavelength;
            let y = x.sin();
            let amp = ease(i / self.state.drawable_width, self.params.amplitude * 1.5);
            self.surface.line_to(i + self.state.drawable_left, amp * y + y_axis);
            i += stride;
        }

        self.surface.line_to(self.state.width, y_axis);
        self.surface.stroke(&style);
    }
}

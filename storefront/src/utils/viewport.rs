//! # Viewport
//!
//! Window dimensions and layout breakpoints.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

/// Minimum widths of each breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub xs: u32,
    pub sm: u32,
    pub md: u32,
    pub lg: u32,
    pub xl: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            xs: 0,
            sm: 600,
            md: 960,
            lg: 1280,
            xl: 1920,
        }
    }
}

impl Breakpoints {
    pub fn min_width(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub breakpoints: Breakpoints,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            breakpoints: Breakpoints::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_mobile(&self) -> bool {
        self.width < self.breakpoints.sm
    }

    pub fn is_tablet(&self) -> bool {
        self.width >= self.breakpoints.sm && self.width < self.breakpoints.md
    }

    pub fn is_desktop(&self) -> bool {
        self.width >= self.breakpoints.md
    }

    /// Width is at least the breakpoint's minimum
    pub fn is_breakpoint(&self, breakpoint: Breakpoint) -> bool {
        self.width >= self.breakpoints.min_width(breakpoint)
    }

    /// Product cards per row: 1 on phones, 2 on tablets, 3 otherwise
    pub fn grid_columns(&self) -> usize {
        if self.is_mobile() {
            1
        } else if self.is_tablet() {
            2
        } else {
            3
        }
    }
}

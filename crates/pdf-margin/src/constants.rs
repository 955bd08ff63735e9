//! Shared constants for margin insertion

// =============================================================================
// Margin Sizes
// =============================================================================

/// Margin sizes offered as one-click presets (points)
pub const MARGIN_PRESETS: [u32; 11] = [100, 200, 300, 400, 500, 750, 1000, 1500, 2000, 2500, 3000];

/// Margin size used when none is configured (points)
pub const DEFAULT_MARGIN_SIZE: u32 = 100;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Output Document
// =============================================================================

/// PDF version written to output documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";

/// Upper bound on `/Parent` hops when resolving inherited page attributes
pub const MAX_INHERITANCE_DEPTH: usize = 32;

/// Name of the embedded source page inside each output page's resources
pub const EMBEDDED_PAGE_NAME: &str = "SrcPage";

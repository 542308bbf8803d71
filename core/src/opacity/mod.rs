//! Stroke-opacity profiling for SVG sketch outputs.

pub mod naming;
pub mod profile;
pub mod resolver;

pub use naming::{LabelRule, LabelRules};
pub use profile::{analyze_svg_file, collect_opacities, OpacityBucket, OpacityBuckets, OpacityProfile};
pub use resolver::{
    InlineStyleResolver, OpacityAttributeResolver, OpacityResolver, ResolverChain,
    StrokeOpacityAttributeResolver,
};

use crate::prelude::{AnalysisError, AnalysisResult};
use roxmltree::Node;

pub const STROKE_OPACITY: &str = "stroke-opacity";
pub const OPACITY: &str = "opacity";

/// Opacity assumed when no resolver finds a value.
pub const DEFAULT_OPACITY: f64 = 1.0;

/// One source of an element's opacity. `Ok(None)` hands over to the next
/// resolver in the chain.
pub trait OpacityResolver {
    fn name(&self) -> &'static str;
    fn resolve(&self, element: Node<'_, '_>) -> AnalysisResult<Option<f64>>;
}

fn parse_opacity(raw: &str, origin: &'static str) -> AnalysisResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AnalysisError::InvalidOpacity {
            value: raw.to_string(),
            origin,
        })
}

/// `stroke-opacity` declared inside the inline `style` attribute.
pub struct InlineStyleResolver;

impl OpacityResolver for InlineStyleResolver {
    fn name(&self) -> &'static str {
        "style"
    }

    fn resolve(&self, element: Node<'_, '_>) -> AnalysisResult<Option<f64>> {
        let Some(style) = element.attribute("style") else {
            return Ok(None);
        };
        let Some(entry) = style.split(';').find(|part| part.contains(STROKE_OPACITY)) else {
            return Ok(None);
        };
        // Value runs from the first colon up to the next one, if any.
        let value = entry
            .split(':')
            .nth(1)
            .ok_or_else(|| AnalysisError::InvalidOpacity {
                value: entry.to_string(),
                origin: self.name(),
            })?;
        parse_opacity(value, self.name()).map(Some)
    }
}

/// Direct `stroke-opacity` attribute. Empty values count as absent.
pub struct StrokeOpacityAttributeResolver;

impl OpacityResolver for StrokeOpacityAttributeResolver {
    fn name(&self) -> &'static str {
        STROKE_OPACITY
    }

    fn resolve(&self, element: Node<'_, '_>) -> AnalysisResult<Option<f64>> {
        match element.attribute(STROKE_OPACITY) {
            Some(raw) if !raw.is_empty() => parse_opacity(raw, self.name()).map(Some),
            _ => Ok(None),
        }
    }
}

/// Generic `opacity` attribute. Empty values count as absent.
pub struct OpacityAttributeResolver;

impl OpacityResolver for OpacityAttributeResolver {
    fn name(&self) -> &'static str {
        OPACITY
    }

    fn resolve(&self, element: Node<'_, '_>) -> AnalysisResult<Option<f64>> {
        match element.attribute(OPACITY) {
            Some(raw) if !raw.is_empty() => parse_opacity(raw, self.name()).map(Some),
            _ => Ok(None),
        }
    }
}

/// Resolvers tried in order; the first value found wins.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn OpacityResolver>>,
    fallback: f64,
}

impl ResolverChain {
    pub fn new(resolvers: Vec<Box<dyn OpacityResolver>>, fallback: f64) -> Self {
        Self {
            resolvers,
            fallback,
        }
    }

    pub fn resolve(&self, element: Node<'_, '_>) -> AnalysisResult<f64> {
        for resolver in &self.resolvers {
            if let Some(value) = resolver.resolve(element)? {
                return Ok(value);
            }
        }
        Ok(self.fallback)
    }
}

impl Default for ResolverChain {
    /// Inline style, then `stroke-opacity`, then `opacity`, then fully opaque.
    fn default() -> Self {
        Self::new(
            vec![
                Box::new(InlineStyleResolver),
                Box::new(StrokeOpacityAttributeResolver),
                Box::new(OpacityAttributeResolver),
            ],
            DEFAULT_OPACITY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn with_path<R>(attrs: &str, check: impl FnOnce(Node<'_, '_>) -> R) -> R {
        let xml = format!(r#"<svg xmlns="http://www.w3.org/2000/svg"><path {attrs}/></svg>"#);
        let doc = Document::parse(&xml).unwrap();
        let node = doc
            .descendants()
            .find(|n| n.has_tag_name("path"))
            .unwrap();
        check(node)
    }

    #[test]
    fn style_entry_is_trimmed_and_parsed() {
        let value = with_path(r#"style="fill:none; stroke-opacity : 0.25 ;stroke:#000""#, |n| {
            InlineStyleResolver.resolve(n).unwrap()
        });
        assert_eq!(value, Some(0.25));
    }

    #[test]
    fn style_value_stops_at_the_next_colon() {
        let value = with_path(r#"style="stroke-opacity:0.5:x""#, |n| {
            ResolverChain::default().resolve(n).unwrap()
        });
        assert_eq!(value, 0.5);

        let result = with_path(r#"style="stroke-opacity 0.5""#, |n| {
            InlineStyleResolver.resolve(n)
        });
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidOpacity { origin: "style", .. })
        ));
    }

    #[test]
    fn style_without_stroke_opacity_defers() {
        let value = with_path(r#"style="fill:none" opacity="0.4""#, |n| {
            InlineStyleResolver.resolve(n).unwrap()
        });
        assert_eq!(value, None);
    }

    #[test]
    fn empty_attribute_defers_to_next_resolver() {
        let value = with_path(r#"stroke-opacity="" opacity="0.4""#, |n| {
            ResolverChain::default().resolve(n).unwrap()
        });
        assert_eq!(value, 0.4);
    }

    #[test]
    fn chain_respects_priority_order() {
        let value = with_path(
            r#"style="stroke-opacity:0.1" stroke-opacity="0.2" opacity="0.3""#,
            |n| ResolverChain::default().resolve(n).unwrap(),
        );
        assert_eq!(value, 0.1);

        let value = with_path(r#"stroke-opacity="0.2" opacity="0.3""#, |n| {
            ResolverChain::default().resolve(n).unwrap()
        });
        assert_eq!(value, 0.2);
    }

    #[test]
    fn chain_defaults_to_opaque() {
        let value = with_path(r#"d="M0 0L1 1""#, |n| ResolverChain::default().resolve(n).unwrap());
        assert_eq!(value, DEFAULT_OPACITY);
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let result = with_path(r#"stroke-opacity="half""#, |n| {
            ResolverChain::default().resolve(n)
        });
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidOpacity { origin: "stroke-opacity", .. })
        ));
    }
}

//! Directive string parsing.
//!
//! The user hands us one string like `"speed=1.5,contrast=2,hflip"`. The
//! separator is chosen once for the whole string: `,` if any comma appears
//! anywhere, otherwise `|`. Tokens split on the first `=`; a token without a
//! value gets `"1"`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub value: String,
}

/// Ordered, name-deduplicated set of directives for one run.
///
/// Insertion order is significant: it becomes filter-chain order. A repeated
/// name keeps its original position but takes the last value, the same way a
/// mapping insert behaves.
#[derive(Debug, Default, Clone)]
pub struct EffectRequest {
    directives: Vec<Directive>,
}

impl EffectRequest {
    fn insert(&mut self, name: String, value: String) {
        if let Some(existing) = self.directives.iter_mut().find(|d| d.name == name) {
            existing.value = value;
        } else {
            self.directives.push(Directive { name, value });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

pub fn parse(raw: &str) -> EffectRequest {
    let sep = if raw.contains(',') { ',' } else { '|' };
    let mut request = EffectRequest::default();

    for token in raw.split(sep) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.split_once('=') {
            Some((name, value)) => {
                request.insert(name.trim().to_lowercase(), value.trim().to_string());
            }
            None => {
                request.insert(token.to_lowercase(), "1".to_string());
            }
        }
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(request: &EffectRequest) -> Vec<(&str, &str)> {
        request
            .iter()
            .map(|d| (d.name.as_str(), d.value.as_str()))
            .collect()
    }

    #[test]
    fn splits_and_defaults() {
        let req = parse("speed=1.5,hflip");
        assert_eq!(pairs(&req), vec![("speed", "1.5"), ("hflip", "1")]);
    }

    #[test]
    fn comma_wins_over_pipe_globally() {
        // The pipe stays inside the value once a comma exists anywhere.
        let req = parse("reverb=3|4,mute");
        assert_eq!(pairs(&req), vec![("reverb", "3|4"), ("mute", "1")]);
    }

    #[test]
    fn pipe_separator_without_comma() {
        let req = parse("speed=2|vflip|blur=4");
        assert_eq!(
            pairs(&req),
            vec![("speed", "2"), ("vflip", "1"), ("blur", "4")]
        );
    }

    #[test]
    fn first_equals_splits_rest_kept_raw() {
        let req = parse("bass=a=b=c");
        assert_eq!(pairs(&req), vec![("bass", "a=b=c")]);
    }

    #[test]
    fn names_are_case_folded_and_trimmed() {
        let req = parse("  Speed = 2 , HFLIP ");
        assert_eq!(pairs(&req), vec![("speed", "2"), ("hflip", "1")]);
    }

    #[test]
    fn duplicate_keeps_position_takes_last_value() {
        let req = parse("speed=1,hue=10,speed=3");
        assert_eq!(pairs(&req), vec![("speed", "3"), ("hue", "10")]);
    }

    #[test]
    fn empty_tokens_skipped() {
        let req = parse("speed=2,,hflip,");
        assert_eq!(req.len(), 2);
    }
}

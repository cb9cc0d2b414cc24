/// Ordered parameter captures from a successful lookup.
///
/// Names borrow from the tree, values borrow from the looked-up path.
/// Order follows the parameters' appearance in the pattern, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Params<'a> {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty parameter list able to hold `capacity` pairs
    /// without reallocating (see [`PathTree::max_params`](crate::PathTree::max_params)).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }

    /// Value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find_map(|&(k, v)| (k == name).then_some(v))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Copy the pairs out into owned strings.
    pub fn to_owned_vec(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub(crate) fn push(&mut self, name: &'a str, value: &'a str) {
        self.pairs.push((name, value));
    }
}

impl<'a> IntoIterator for Params<'a> {
    type Item = (&'a str, &'a str);
    type IntoIter = std::vec::IntoIter<(&'a str, &'a str)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> From<Params<'a>> for Vec<(&'a str, &'a str)> {
    fn from(params: Params<'a>) -> Self {
        params.pairs
    }
}

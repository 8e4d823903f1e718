/// Symbolic route names for the five CRUD operations of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteNames {
    pub list: &'static str,
    pub detail: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// A persisted record type that the generic CRUD handlers can serve.
///
/// `Related` is the record type on the other side of the many-to-many
/// association, so `Product::Related == Shipment` and vice versa.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Cleaned, validated form input used for inserts and updates.
    type Input: Send + 'static;
    type Related: Clone + Send + Sync + 'static;

    const VERBOSE_NAME: &'static str;
    const VERBOSE_NAME_PLURAL: &'static str;
    const ROUTES: RouteNames;

    fn id(&self) -> i64;

    /// Short human label, used in choice lists and confirmation pages.
    fn label(&self) -> String;
}

/// A record together with its prefetched related collection.
pub struct WithRelated<E: Entity> {
    pub record: E,
    pub related: Vec<E::Related>,
}

impl<E: Entity> Clone for WithRelated<E> {
    fn clone(&self) -> Self {
        Self {
            record: self.record.clone(),
            related: self.related.clone(),
        }
    }
}

impl<E> std::fmt::Debug for WithRelated<E>
where
    E: Entity + std::fmt::Debug,
    E::Related: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithRelated")
            .field("record", &self.record)
            .field("related", &self.related)
            .finish()
    }
}

impl<E: Entity> WithRelated<E> {
    #[must_use]
    pub fn new(record: E, related: Vec<E::Related>) -> Self {
        Self { record, related }
    }
}

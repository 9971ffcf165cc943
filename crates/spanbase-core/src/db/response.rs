//! Module: response
//! Responsibility: finished page payloads handed to the transport layer.
//! Does not own: pagination, cursor encoding, or node serialization.

use crate::db::cursor::Cursor;
use serde::Serialize;

///
/// Connection
///
/// One page of edges plus its window metadata. Built fresh per request
/// and never persisted.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<N> {
    pub edges: Vec<Edge<N>>,
    pub page_info: PageInfo,
}

impl<N> Connection<N> {
    /// Build a connection, deriving start/end cursors from the edges.
    #[must_use]
    pub fn new(edges: Vec<Edge<N>>, has_previous_page: bool, has_next_page: bool) -> Self {
        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        };

        Self { edges, page_info }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), false, false)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.edges.iter().map(|edge| &edge.node)
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<N> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// Rowids named by the edge cursors, in page order.
    #[must_use]
    pub fn cursor_rowids(&self) -> Vec<i64> {
        self.edges.iter().map(|edge| edge.cursor.rowid).collect()
    }
}

///
/// Edge
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Edge<N> {
    pub node: N,
    pub cursor: Cursor,
}

impl<N> Edge<N> {
    #[must_use]
    pub const fn new(node: N, cursor: Cursor) -> Self {
        Self { node, cursor }
    }
}

///
/// PageInfo
///
/// `start_cursor` / `end_cursor` belong to the first and last returned edge
/// (never to an over-fetched row) and are `None` on an empty page.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<Cursor>,
    pub end_cursor: Option<Cursor>,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SortValue;

    #[test]
    fn page_info_cursors_follow_first_and_last_edge() {
        let connection = Connection::new(
            vec![
                Edge::new("a", Cursor::new(1)),
                Edge::new("b", Cursor::new(2)),
                Edge::new("c", Cursor::new(3)),
            ],
            false,
            true,
        );

        assert_eq!(connection.page_info.start_cursor, Some(Cursor::new(1)));
        assert_eq!(connection.page_info.end_cursor, Some(Cursor::new(3)));
        assert_eq!(connection.nodes().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn empty_connection_has_no_cursors() {
        let connection = Connection::<()>::empty();

        assert!(connection.is_empty());
        assert_eq!(connection.page_info, PageInfo::default());
    }

    #[test]
    fn serializes_with_transport_field_names_and_opaque_cursors() {
        let cursor = Cursor::with_sort(3, SortValue::Int(2));
        let connection = Connection::new(vec![Edge::new(7_u32, cursor.clone())], true, false);
        let json = serde_json::to_value(&connection).expect("connection should serialize");

        assert_eq!(json["edges"][0]["node"], 7);
        assert_eq!(json["edges"][0]["cursor"], cursor.encode());
        assert_eq!(json["pageInfo"]["hasPreviousPage"], true);
        assert_eq!(json["pageInfo"]["hasNextPage"], false);
        assert_eq!(json["pageInfo"]["endCursor"], cursor.encode());
    }

    #[test]
    fn empty_page_serializes_null_cursors() {
        let json = serde_json::to_value(Connection::<u32>::empty()).expect("should serialize");

        assert!(json["pageInfo"]["startCursor"].is_null());
        assert!(json["pageInfo"]["endCursor"].is_null());
    }
}

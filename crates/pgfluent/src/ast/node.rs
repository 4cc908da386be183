//! Node kinds and their rendering metadata.
//!
//! Every syntax and punctuation decision lives in [`NodeKind::meta`]; the
//! formatter itself knows nothing about SQL keywords.

/// When a node wraps its joined children in parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parens {
    Never,
    Always,
    /// Only when more than one child renders.
    WhenMany,
}

/// How a node attaches to the sibling rendered before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glue {
    /// The parent's separator.
    Separator,
    /// A single space, whatever the parent's separator is.
    Space,
}

/// Rendering rules of one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMeta {
    /// Emitted before the children, followed by one space when children render.
    pub keyword: &'static str,
    /// Placed between rendered children.
    pub separator: &'static str,
    pub parens: Parens,
    pub glue: Glue,
}

const fn meta(keyword: &'static str, separator: &'static str, parens: Parens) -> NodeMeta {
    NodeMeta {
        keyword,
        separator,
        parens,
        glue: Glue::Separator,
    }
}

const COMMA: &str = ", ";
const SPACE: &str = " ";

/// The closed set of tree node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Tree root; top-level clauses attach here.
    Root,
    /// Keyword-less, space separated grouping (a predicate, an ORDER BY term).
    Empty,
    /// Keyword-less, comma separated list.
    Items,
    /// Nested condition group, parenthesized when it holds more than one term.
    Group,

    // Conditions
    Not,
    And,
    Or,
    AndNot,
    OrNot,

    // WITH
    With,
    WithRecursive,

    // SELECT
    Select,
    SelectAll,
    SelectDistinct,
    /// `SELECT DISTINCT` followed by an `ON (...)` node and the column list.
    SelectDistinctOn,
    DistinctOn,
    From,
    TableSample,
    Join,
    InnerJoin,
    LeftJoin,
    RightJoin,
    FullJoin,
    CrossJoin,
    NaturalJoin,
    On,
    JoinUsing,
    Where,
    WhereCurrentOf,
    GroupBy,
    Having,
    Union,
    UnionAll,
    UnionDistinct,
    Intersect,
    IntersectAll,
    IntersectDistinct,
    Except,
    ExceptAll,
    ExceptDistinct,
    OrderBy,
    /// Nulls placement of one ORDER BY term; glued to the sort direction.
    Nulls,
    Limit,
    Offset,
    ForUpdate,
    ForNoKeyUpdate,
    ForShare,
    ForKeyShare,

    // INSERT
    InsertInto,
    Overriding,
    DefaultValues,
    Values,
    OnConflict,
    OnConstraint,
    DoNothing,
    DoUpdateSet,
    Returning,

    // UPDATE
    Update,
    Set,

    // DELETE
    DeleteFrom,
    Using,

    // CREATE SEQUENCE
    CreateSequence,
    CreateTempSequence,
    As,
    Increment,
    IncrementBy,
    MinValue,
    NoMinValue,
    MaxValue,
    NoMaxValue,
    Start,
    StartWith,
    Cache,
    Cycle,
    NoCycle,
    OwnedBy,
}

impl NodeKind {
    /// Rendering rules for this kind.
    pub const fn meta(self) -> NodeMeta {
        use NodeKind::*;
        use Parens::*;
        match self {
            Root | Empty | Group => meta(
                "",
                SPACE,
                if matches!(self, Group) { WhenMany } else { Never },
            ),
            Items => meta("", COMMA, Never),

            Not => meta("NOT", SPACE, Never),
            And => meta("AND", SPACE, Never),
            Or => meta("OR", SPACE, Never),
            AndNot => meta("AND NOT", SPACE, Never),
            OrNot => meta("OR NOT", SPACE, Never),

            With => meta("WITH", COMMA, Never),
            WithRecursive => meta("WITH RECURSIVE", COMMA, Never),

            Select => meta("SELECT", COMMA, Never),
            SelectAll => meta("SELECT ALL", COMMA, Never),
            SelectDistinct => meta("SELECT DISTINCT", COMMA, Never),
            SelectDistinctOn => meta("SELECT DISTINCT", SPACE, Never),
            DistinctOn => meta("ON", COMMA, Always),
            From => meta("FROM", COMMA, Never),
            TableSample => meta("TABLESAMPLE", SPACE, Never),
            Join => meta("JOIN", SPACE, Never),
            InnerJoin => meta("INNER JOIN", SPACE, Never),
            LeftJoin => meta("LEFT JOIN", SPACE, Never),
            RightJoin => meta("RIGHT JOIN", SPACE, Never),
            FullJoin => meta("FULL JOIN", SPACE, Never),
            CrossJoin => meta("CROSS JOIN", SPACE, Never),
            NaturalJoin => meta("NATURAL JOIN", SPACE, Never),
            On => meta("ON", SPACE, Never),
            JoinUsing => meta("USING", COMMA, Always),
            Where => meta("WHERE", SPACE, Never),
            WhereCurrentOf => meta("WHERE CURRENT OF", SPACE, Never),
            GroupBy => meta("GROUP BY", COMMA, Never),
            Having => meta("HAVING", SPACE, Never),
            Union => meta("UNION", SPACE, Never),
            UnionAll => meta("UNION ALL", SPACE, Never),
            UnionDistinct => meta("UNION DISTINCT", SPACE, Never),
            Intersect => meta("INTERSECT", SPACE, Never),
            IntersectAll => meta("INTERSECT ALL", SPACE, Never),
            IntersectDistinct => meta("INTERSECT DISTINCT", SPACE, Never),
            Except => meta("EXCEPT", SPACE, Never),
            ExceptAll => meta("EXCEPT ALL", SPACE, Never),
            ExceptDistinct => meta("EXCEPT DISTINCT", SPACE, Never),
            OrderBy => meta("ORDER BY", COMMA, Never),
            Nulls => NodeMeta {
                keyword: "",
                separator: SPACE,
                parens: Never,
                glue: Glue::Space,
            },
            Limit => meta("LIMIT", SPACE, Never),
            Offset => meta("OFFSET", SPACE, Never),
            ForUpdate => meta("FOR UPDATE", SPACE, Never),
            ForNoKeyUpdate => meta("FOR NO KEY UPDATE", SPACE, Never),
            ForShare => meta("FOR SHARE", SPACE, Never),
            ForKeyShare => meta("FOR KEY SHARE", SPACE, Never),

            InsertInto => meta("INSERT INTO", SPACE, Never),
            Overriding => meta("OVERRIDING", SPACE, Never),
            DefaultValues => meta("DEFAULT VALUES", SPACE, Never),
            Values => meta("VALUES", COMMA, Never),
            OnConflict => meta("ON CONFLICT", SPACE, Never),
            OnConstraint => meta("ON CONSTRAINT", SPACE, Never),
            DoNothing => meta("DO NOTHING", SPACE, Never),
            DoUpdateSet => meta("DO UPDATE SET", COMMA, Never),
            Returning => meta("RETURNING", COMMA, Never),

            Update => meta("UPDATE", SPACE, Never),
            Set => meta("SET", COMMA, Never),

            DeleteFrom => meta("DELETE FROM", SPACE, Never),
            Using => meta("USING", COMMA, Never),

            CreateSequence => meta("CREATE SEQUENCE", SPACE, Never),
            CreateTempSequence => meta("CREATE TEMP SEQUENCE", SPACE, Never),
            As => meta("AS", SPACE, Never),
            Increment => meta("INCREMENT", SPACE, Never),
            IncrementBy => meta("INCREMENT BY", SPACE, Never),
            MinValue => meta("MINVALUE", SPACE, Never),
            NoMinValue => meta("NO MINVALUE", SPACE, Never),
            MaxValue => meta("MAXVALUE", SPACE, Never),
            NoMaxValue => meta("NO MAXVALUE", SPACE, Never),
            Start => meta("START", SPACE, Never),
            StartWith => meta("START WITH", SPACE, Never),
            Cache => meta("CACHE", SPACE, Never),
            Cycle => meta("CYCLE", SPACE, Never),
            NoCycle => meta("NO CYCLE", SPACE, Never),
            OwnedBy => meta("OWNED BY", SPACE, Never),
        }
    }

    /// The keyword this kind emits, empty for synthetic groupings.
    pub fn keyword(self) -> &'static str {
        self.meta().keyword
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_kinds_have_no_keyword() {
        for kind in [NodeKind::Root, NodeKind::Empty, NodeKind::Items, NodeKind::Group, NodeKind::Nulls] {
            assert_eq!(kind.keyword(), "", "{kind:?}");
        }
    }

    #[test]
    fn group_parenthesizes_only_when_many() {
        assert_eq!(NodeKind::Group.meta().parens, Parens::WhenMany);
        assert_eq!(NodeKind::Where.meta().parens, Parens::Never);
        assert_eq!(NodeKind::JoinUsing.meta().parens, Parens::Always);
    }

    #[test]
    fn nulls_glues_with_space() {
        assert_eq!(NodeKind::Nulls.meta().glue, Glue::Space);
        assert_eq!(NodeKind::Empty.meta().glue, Glue::Separator);
    }

    #[test]
    fn list_clauses_use_comma() {
        assert_eq!(NodeKind::Select.meta().separator, ", ");
        assert_eq!(NodeKind::Where.meta().separator, " ");
        assert_eq!(NodeKind::SelectDistinctOn.keyword(), "SELECT DISTINCT");
    }
}

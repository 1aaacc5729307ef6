/// Implements [`DataResult`](crate::DataResult) and
/// [`DataObject`](crate::DataObject) for a struct with an
/// `id: AutoPk<i64>` field.
///
/// Every other persisted field is listed with its type and column
/// name, in the column order of the table.
///
/// ```ignore
/// impl_model!(Topic, table = "topics", fields {
///     title: String => "title",
///     created_at: NaiveDateTime => "created_at",
/// });
/// ```
#[macro_export]
macro_rules! impl_model {
    ($model:ty, table = $table:literal, fields { $($field:ident: $ty:ty => $col:literal),+ $(,)? }) => {
        impl $crate::DataResult for $model {
            type DBO = $model;
            const COLUMNS: &'static [$crate::db::Column] = &[
                $crate::db::Column::new("id", $crate::SqlType::BigInt),
                $($crate::db::Column::new($col, <$ty as $crate::FieldType>::SQLTYPE),)+
            ];
            fn from_row(row: &$crate::db::Row) -> $crate::Result<Self> {
                let mut values = row.cursor();
                Ok(Self {
                    id: values.next_value()?,
                    $($field: values.next_value()?,)+
                })
            }
        }

        impl $crate::DataObject for $model {
            const TABLE: &'static str = $table;
            const PKCOL: &'static str = "id";
            const NON_AUTO_COLUMNS: &'static [$crate::db::Column] = &[
                $($crate::db::Column::new($col, <$ty as $crate::FieldType>::SQLTYPE),)+
            ];
            fn pk(&self) -> &$crate::AutoPk<i64> {
                &self.id
            }
            fn pk_mut(&mut self) -> &mut $crate::AutoPk<i64> {
                &mut self.id
            }
            fn non_auto_values(&self) -> Vec<$crate::SqlVal> {
                vec![$($crate::ToSql::to_sql(&self.$field)),+]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use test_log::test;

    use crate::db::sqlite::SQLiteBackend;
    use crate::db::{Backend, Connection, ConnectionMethods};
    use crate::fkey::ForeignKey;
    use crate::query::FieldExpr;
    use crate::{AutoPk, DataObject, DataObjectOps, DataResult, Error};

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: AutoPk<i64>,
        label: String,
    }
    impl_model!(Shelf, table = "shelves", fields { label: String => "label" });

    #[derive(Clone, Debug)]
    struct Book {
        id: AutoPk<i64>,
        title: String,
        pages: i32,
        shelf: ForeignKey<Shelf>,
        read_at: Option<NaiveDateTime>,
    }
    impl_model!(Book, table = "books", fields {
        title: String => "title",
        pages: i32 => "pages",
        shelf: ForeignKey<Shelf> => "shelf_id",
        read_at: Option<NaiveDateTime> => "read_at",
    });
    impl Book {
        const PAGES: FieldExpr<i32> = FieldExpr::new("pages");
    }

    fn connection() -> Connection {
        let conn = SQLiteBackend::new().connect(":memory:").unwrap();
        conn.execute(
            "CREATE TABLE shelves (id INTEGER PRIMARY KEY, label TEXT NOT NULL);
             CREATE TABLE books (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                pages INTEGER NOT NULL,
                shelf_id INTEGER NOT NULL REFERENCES shelves(id) ON DELETE CASCADE,
                read_at TEXT
             );",
        )
        .unwrap();
        conn
    }

    fn shelf(conn: &Connection, label: &str) -> Shelf {
        let mut shelf = Shelf {
            id: AutoPk::uninitialized(),
            label: label.to_string(),
        };
        shelf.save(conn).unwrap();
        shelf
    }

    fn book(conn: &Connection, shelf: &Shelf, title: &str, pages: i32) -> Book {
        let mut book = Book {
            id: AutoPk::uninitialized(),
            title: title.to_string(),
            pages,
            shelf: ForeignKey::for_object(shelf).unwrap(),
            read_at: None,
        };
        book.save(conn).unwrap();
        book
    }

    #[test]
    fn save_then_get() {
        let conn = connection();
        let mut s = shelf(&conn, "fiction");
        assert_eq!(s.id().unwrap(), 1);
        assert_eq!(Shelf::get(&conn, 1).unwrap(), s);

        s.label = "non-fiction".to_string();
        s.save(&conn).unwrap();
        assert_eq!(Shelf::get(&conn, 1).unwrap().label, "non-fiction");
        assert!(Shelf::try_get(&conn, 99).unwrap().is_none());
        assert!(matches!(Shelf::get(&conn, 99), Err(Error::NoSuchObject)));
    }

    #[test]
    fn foreign_key_loads_lazily() {
        let conn = connection();
        let s = shelf(&conn, "poetry");
        book(&conn, &s, "Odes", 80);

        let loaded = Book::get(&conn, 1).unwrap();
        assert!(matches!(loaded.shelf.get(), Err(Error::ValueNotLoaded)));
        assert_eq!(loaded.shelf.load(&conn).unwrap(), &s);
        assert_eq!(loaded.shelf.get().unwrap().label, "poetry");
        assert_eq!(loaded.read_at, None);
    }

    #[test]
    fn query_filters_orders_and_counts() {
        let conn = connection();
        let s = shelf(&conn, "misc");
        book(&conn, &s, "Short", 10);
        book(&conn, &s, "Long", 900);
        book(&conn, &s, "Medium", 300);

        let titles: Vec<String> = Book::query()
            .filter(Book::PAGES.gt(50))
            .order_desc("pages")
            .load(&conn)
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Long", "Medium"]);
        assert_eq!(Book::query().filter(Book::PAGES.lt(50)).count(&conn).unwrap(), 1);
    }

    #[test]
    fn deleting_parent_cascades() {
        let conn = connection();
        let s = shelf(&conn, "doomed");
        book(&conn, &s, "One", 1);
        book(&conn, &s, "Two", 2);
        s.delete(&conn).unwrap();
        assert_eq!(Book::query().count(&conn).unwrap(), 0);
        assert_eq!(conn.count(Shelf::TABLE, None).unwrap(), 0);
    }

    #[test]
    fn unsaved_objects_cannot_be_referenced() {
        let unsaved = Shelf {
            id: AutoPk::uninitialized(),
            label: "draft".to_string(),
        };
        assert!(matches!(
            ForeignKey::for_object(&unsaved),
            Err(Error::ValueNotSaved)
        ));
    }
}

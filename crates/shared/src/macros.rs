// crates/shared/src/macros.rs

/// Declares the tools a toolbelt exposes.
///
/// Generates a lazily built `INSTANCE` of the toolbelt, one `<method>_handler`
/// free function per tool, and a `TOOL_ENTRIES` table that a
/// [`ToolBox`](crate::registry::ToolBox) can register.
#[macro_export]
macro_rules! register_toolbelt {
    (
        $toolbelt_type:ty {
            tools: {
                $(
                    $name:literal => $method:ident {
                        doc: $doc:expr $(,)?
                    }
                ),* $(,)?
            }
        }
    ) => {
        use once_cell::sync::Lazy;

        pub static INSTANCE: Lazy<$toolbelt_type> = Lazy::new(<$toolbelt_type>::default);

        $(
            paste::paste! {
                pub fn [<$method _handler>](input: &serde_json::Value) -> String {
                    INSTANCE.$method(input)
                }
            }
        )*

        paste::paste! {
            pub static TOOL_ENTRIES: &[$crate::schemas::Tool] = &[
                $($crate::schemas::Tool::new($name, $doc, [<$method _handler>])),*
            ];
        }
    };
}

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro that generates a companion `*Table` struct for collecting
/// per-day record rows column by column. Every field type must implement
/// `Clone`, `Debug` and `PartialEq`.
///
/// The generated table struct has the same fields as `Vec<T>`, along with
/// `with_capacity`, `push`, `len`, `is_empty`, `row` and `retain_rows`
/// methods. A `column_names()` associated function is also added to the
/// original struct.
///
/// Use `#[record(table_name = "CustomName")]` on the struct to override the
/// default table struct name (`{StructName}Table`), and
/// `#[record(column = "External name")]` on a field to override the exported
/// column name (defaults to the field name).
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let table_name = match string_attr(&input.attrs, "table_name") {
        Ok(Some(s)) => format_ident!("{}", s),
        Ok(None) => format_ident!("{}Table", name),
        Err(e) => return e.to_compile_error().into(),
    };

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Record can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "Record struct must have at least one field")
            .to_compile_error()
            .into();
    }

    let mut column_names = Vec::new();
    let mut field_idents = Vec::new();
    let mut field_types = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Record fields must be named")
                .to_compile_error()
                .into();
        };
        if matches!(field.ty, syn::Type::Reference(_)) {
            return syn::Error::new_spanned(&field.ty, "Record derive: fields must be owned")
                .to_compile_error()
                .into();
        }
        let column = match string_attr(&field.attrs, "column") {
            Ok(Some(s)) => s,
            Ok(None) => ident.to_string(),
            Err(e) => return e.to_compile_error().into(),
        };
        column_names.push(column);
        field_idents.push(ident);
        field_types.push(&field.ty);
    }

    let first_field = &field_idents[0];

    let table_fields = field_idents.iter().zip(&field_types).map(|(f, ty)| {
        quote! { pub #f: Vec<#ty> }
    });

    let with_cap_fields = field_idents.iter().map(|f| {
        quote! { #f: Vec::with_capacity(n) }
    });

    let push_fields = field_idents.iter().map(|f| {
        quote! { self.#f.push(::core::clone::Clone::clone(&r.#f)); }
    });

    let row_fields = field_idents.iter().map(|f| {
        quote! { #f: ::core::clone::Clone::clone(&self.#f[i]) }
    });

    let retain_fields = field_idents.iter().map(|f| {
        quote! {
            let mut mask = keep.iter();
            self.#f.retain(|_| mask.next().copied().unwrap_or(false));
        }
    });

    let expanded: proc_macro2::TokenStream = quote! {
        /// Auto-generated columnar table collecting one row per record.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #table_name {
            #(#table_fields,)*
        }

        impl #table_name {
            /// Pre-allocate all columns for `n` rows.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap_fields,)*
                }
            }

            /// Append a single row.
            pub fn push(&mut self, r: &#name) {
                #(#push_fields)*
            }

            /// Number of rows stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no rows have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }

            /// Reassemble row `i`, or `None` when out of range.
            pub fn row(&self, i: usize) -> Option<#name> {
                if i >= self.len() {
                    return None;
                }
                Some(#name {
                    #(#row_fields,)*
                })
            }

            /// Keep only the rows whose entry in `keep` is `true`.
            ///
            /// Rows past the end of `keep` are dropped.
            pub fn retain_rows(&mut self, keep: &[bool]) {
                #(#retain_fields)*
            }
        }

        impl #name {
            /// Returns the exported column names of this record, in field order.
            pub fn column_names() -> &'static [&'static str] {
                &[#(#column_names),*]
            }
        }
    };

    expanded.into()
}

/// Look up `#[record(key = "value")]` among `attrs`.
fn string_attr(attrs: &[syn::Attribute], key: &str) -> syn::Result<Option<String>> {
    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        let nested = attr.parse_args_with(
            syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated,
        )?;
        for meta in nested {
            if let Meta::NameValue(nv) = meta {
                if nv.path.is_ident(key) {
                    if let syn::Expr::Lit(expr_lit) = &nv.value {
                        if let Lit::Str(lit_str) = &expr_lit.lit {
                            return Ok(Some(lit_str.value()));
                        }
                    }
                    return Err(syn::Error::new_spanned(
                        &nv.value,
                        format!("`{}` expects a string literal", key),
                    ));
                }
            }
        }
    }
    Ok(None)
}

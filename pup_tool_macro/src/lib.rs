use proc_macro::TokenStream;

#[proc_macro]
pub fn struct_unpack_impl_for_num(item: TokenStream) -> TokenStream {
    let i = syn::parse_macro_input!(item as syn::Ident);
    let output = quote::quote! {
        impl StructUnpack for #i {
            fn unpack<R: std::io::Read + std::io::Seek>(mut reader: R, big: bool) -> std::io::Result<Self> {
                let mut buf = [0u8; std::mem::size_of::<#i>()];
                reader.read_exact(&mut buf)?;
                Ok(if big {
                    #i::from_be_bytes(buf)
                } else {
                    #i::from_le_bytes(buf)
                })
            }
        }
    };
    output.into()
}

/// Macro to derive `StructUnpack` trait for fixed-layout structs.
///
/// Fields are read in declaration order with no padding between them.
/// Every field type must implement `StructUnpack` itself.
#[proc_macro_derive(StructUnpack)]
pub fn struct_unpack_derive(input: TokenStream) -> TokenStream {
    let sut = syn::parse_macro_input!(input as syn::ItemStruct);
    let name = sut.ident;
    let syn::Fields::Named(named) = sut.fields else {
        return syn::Error::new_spanned(name, "StructUnpack requires named fields")
            .to_compile_error()
            .into();
    };
    let mut fields = Vec::new();
    let smts: Vec<_> = named
        .named
        .iter()
        .map(|field| {
            let field_name = &field.ident;
            fields.push(field_name.clone());
            let field_type = &field.ty;
            quote::quote! {
                let #field_name = <#field_type as crate::utils::struct_pack::StructUnpack>::unpack(&mut reader, big)?;
            }
        })
        .collect();
    let output = quote::quote! {
        impl crate::utils::struct_pack::StructUnpack for #name {
            fn unpack<R: std::io::Read + std::io::Seek>(mut reader: R, big: bool) -> std::io::Result<Self> {
                #(#smts)*
                Ok(Self { #(#fields),* })
            }
        }
    };
    output.into()
}

use proc_macro::TokenStream;
use quote::quote;

#[derive(deluxe::ParseMetaItem)]
#[deluxe(attributes(match_rule))]
struct RuleAttributes(syn::Ident, #[deluxe(flatten)] RuleNamedAttributes);

#[derive(deluxe::ParseMetaItem)]
struct RuleNamedAttributes {
  name: String,
}

/// Turns a decision-list step into a unit struct implementing `Rule`.
///
/// The annotated function must be `fn apply(&self, pair: &mut Pair) -> Verdict`,
/// and `Rule`, `Pair` and `Verdict` must be in scope at the call site.
#[proc_macro_attribute]
pub fn match_rule(attrs: TokenStream, input: TokenStream) -> TokenStream {
  let RuleAttributes(ident, RuleNamedAttributes { name }) = match deluxe::parse2::<RuleAttributes>(attrs.into()) {
    Ok(attrs) => attrs,
    Err(err) => return err.into_compile_error().into(),
  };

  let input = proc_macro2::TokenStream::from(input);

  quote! {
      pub(crate) struct #ident;

      impl Rule for #ident {
        fn name(&self) -> &'static str {
            #name
        }

        #[tracing::instrument(level = "trace", name = #name, skip_all, fields(osm = %pair.osm, wd = %pair.wd))]
        #input
      }
  }
  .into()
}

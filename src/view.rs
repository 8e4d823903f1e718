use maud::Markup;

use crate::controller::routes::Urls;
use crate::forms::ModelForm;
use crate::model::WithRelated;

pub mod errors;
pub mod form;
pub mod layout;
mod product;
mod shipment;

/// Page templates of one entity. Form pages are shared, see [`form`].
pub trait Templates: ModelForm {
    fn list_page(items: &[WithRelated<Self>], urls: &Urls) -> Markup;
    fn detail_page(item: &WithRelated<Self>, urls: &Urls) -> Markup;
    fn confirm_delete_page(item: &WithRelated<Self>, urls: &Urls) -> Markup;
}

use crate::config::SiteSettings;
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

/// Builds the layout chrome shared by every public page.
#[derive(Clone)]
pub struct ChromeService {
    site: SiteSettings,
}

impl ChromeService {
    pub fn new(site: SiteSettings) -> Self {
        Self { site }
    }

    pub fn load(&self) -> LayoutChrome {
        LayoutChrome {
            brand: BrandView {
                title: self.site.brand_title.clone(),
                tagline: self.site.tagline.clone(),
                href: "/".to_string(),
            },
            navigation: NavigationView {
                entries: vec![link("Home", "/"), link("Contact", "/contact")],
            },
            footer: FooterView {
                copy: self.site.footer_copy.clone(),
            },
            meta: PageMetaView {
                title: self.site.brand_title.clone(),
                description: self.site.tagline.clone(),
            },
        }
    }
}

fn link(label: &str, href: &str) -> NavigationLinkView {
    NavigationLinkView {
        label: label.to_string(),
        href: href.to_string(),
    }
}

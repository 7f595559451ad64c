use crate::models::CityResource;

/// Find the contact record for a city.
///
/// Case-insensitive exact match first; otherwise the first resource whose
/// city contains the query or is contained in it. Blank queries match nothing.
pub fn get_city_resources(resources: &[CityResource], city: Option<&str>) -> Option<CityResource> {
    let query = city.map(str::trim).filter(|c| !c.is_empty())?.to_lowercase();

    let exact = resources
        .iter()
        .find(|r| r.city.to_lowercase() == query);

    exact
        .or_else(|| {
            resources.iter().find(|r| {
                let name = r.city.to_lowercase();
                name.contains(&query) || query.contains(&name)
            })
        })
        .cloned()
}

use crate::alert::Coordinates;

/// Google Maps link for `coordinates`.
pub fn map_url(coordinates: Coordinates) -> String {
    format!(
        "https://maps.google.com/?q={},{}",
        coordinates.latitude, coordinates.longitude
    )
}

/// Standard alert text sent on every channel.
pub fn build_alert_text(name: &str, coordinates: Option<Coordinates>) -> String {
    let location = match coordinates {
        Some(c) => format!("Localização (mapa): {}", map_url(c)),
        None => "Localização: não informada".to_string(),
    };

    format!(
        "🚨 ALERTA de {name}\n\
         Situação: sos pessoal\n\
         {location}\n\
         \n\
         Se não puder ajudar, encaminhe às autoridades."
    )
}

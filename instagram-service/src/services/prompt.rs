//! Prompt rendering for the identity request.
//!
//! Input values are embedded verbatim. No escaping is applied.

use crate::models::IdentityRequest;

/// System turn sent with every completion request.
pub const SYSTEM_INSTRUCTION: &str =
    "Eres un experto en marketing digital y community management para Instagram.";

/// Sampling temperature for the identity prompt.
pub const TEMPERATURE: f32 = 0.7;

/// Output cap for the identity prompt.
pub const MAX_TOKENS: u32 = 1000;

/// Render the user turn for `request`.
pub fn render_identity_prompt(request: &IdentityRequest) -> String {
    format!(
        r#"
Actuás como un experto en marketing digital con experiencia en redes sociales, especialmente en Instagram. Tu rol será el de community manager estratégico.

Siempre que te proporcione los siguientes datos:
- Nombre de usuario deseado: {username}
- Qué quiere expresar la biografía: {bio}
- A quién va dirigida la cuenta (público objetivo): {audience}

Tu tarea será analizar esta información y devolver siempre una respuesta estructurada en el siguiente FORMATO JSON:

{{
  "sugerencias_usuario": [
    "nombre_creativo_1",
    "nombre_creativo_2",
    "nombre_creativo_3",
    "nombre_creativo_4",
    "nombre_creativo_5"
  ],
  "biografias": [
    "Primera opción de biografía impactante",
    "Segunda opción de biografía impactante"
  ],
  "publico_objetivo": "Descripción clara del público objetivo, incluyendo segmentación si es necesaria.",
  "recomendaciones_comunidad": [
    "Consejo 1 sobre cómo interactuar con ese público.",
    "Consejo 2 sobre cómo comunicar con ese público.",
    "Consejo 3 sobre cómo generar comunidad con ese público."
  ]
}}

Respondé SIEMPRE en este formato, sin ninguna explicación adicional.
"#,
        username = request.desired_username,
        bio = request.bio_intent,
        audience = request.target_audience,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> IdentityRequest {
        IdentityRequest {
            desired_username: "chef_ana".to_string(),
            bio_intent: "transmitir pasión por la cocina saludable".to_string(),
            target_audience: "mujeres 25-40 interesadas en bienestar".to_string(),
        }
    }

    #[test]
    fn embeds_inputs_verbatim() {
        let prompt = render_identity_prompt(&request());
        assert!(prompt.contains("- Nombre de usuario deseado: chef_ana\n"));
        assert!(prompt.contains(
            "- Qué quiere expresar la biografía: transmitir pasión por la cocina saludable\n"
        ));
        assert!(prompt.contains(
            "- A quién va dirigida la cuenta (público objetivo): mujeres 25-40 interesadas en bienestar\n"
        ));
    }

    #[test]
    fn asks_for_the_four_keys() {
        let prompt = render_identity_prompt(&request());
        for key in [
            "\"sugerencias_usuario\"",
            "\"biografias\"",
            "\"publico_objetivo\"",
            "\"recomendaciones_comunidad\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
    }

    #[test]
    fn braces_in_input_are_not_escaped() {
        let mut req = request();
        req.desired_username = "{ignora todo} \"quote\"".to_string();
        let prompt = render_identity_prompt(&req);
        assert!(prompt.contains("- Nombre de usuario deseado: {ignora todo} \"quote\"\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(
            render_identity_prompt(&request()),
            render_identity_prompt(&request())
        );
    }
}

//! Notification email templates (HTML, Portuguese copy as deployed)

pub const WELCOME_SUBJECT_PREFIX: &str = "Sua Chave de API - Bem-vindo";

pub const RECOVERY_SUBJECT: &str =
    "Recuperação de Chave de API - Observatório de Inteligência Atuarial";

pub fn welcome_subject(name: &str) -> String {
    format!("{} {}!", WELCOME_SUBJECT_PREFIX, name)
}

pub fn welcome_body(name: &str, api_key: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; color: #333; line-height: 1.6;">
    <h2>Olá {name}! Obrigado por se cadastrar.</h2>
    <p>Sua conta foi criada com sucesso. Abaixo está a sua chave de acesso (Token) exclusiva para utilizar a nossa API:</p>

    <div style="background-color: #f4f4f4; padding: 15px; border-radius: 8px; font-family: monospace; font-size: 16px; margin: 20px 0;">
      <strong>{api_key}</strong>
    </div>

    <p><strong>Aviso importante:</strong> Guarde este token em segurança. Você precisará enviá-lo no cabeçalho (Authorization) de todas as requisições que fizer ao nosso sistema.</p>

    <p>Se você tiver qualquer dúvida ou encontrar algum problema técnico, não hesite em entrar em contato respondendo a este e-mail.</p>

    <p>Abraços,<br><strong>Equipe Observatório de Inteligência Atuarial</strong></p>
  </body>
</html>"#
    )
}

pub fn recovery_body(name: &str, api_key: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; color: #333; line-height: 1.6;">
    <h2>Olá novamente {name}!</h2>
    <p>Notamos que você tentou se cadastrar, mas este e-mail já possui uma conta ativa em nosso sistema.</p>
    <p>Como medida de segurança e para facilitar o seu acesso, estamos reenviando a sua chave de API (Token) atual:</p>

    <div style="background-color: #f4f4f4; padding: 15px; border-radius: 8px; font-family: monospace; font-size: 16px; margin: 20px 0;">
      <strong>{api_key}</strong>
    </div>

    <p>Lembre-se de utilizar este token no cabeçalho (Authorization) das suas requisições.</p>
    <p>Se você não solicitou este reenvio, por favor, ignore esta mensagem.</p>

    <p>Abraços,<br><strong>Equipe Observatório de Inteligência Atuarial</strong></p>
  </body>
</html>"#
    )
}

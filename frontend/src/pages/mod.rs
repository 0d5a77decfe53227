pub mod asistencia;
pub mod historico;
pub mod home;
pub mod horarios;
pub mod login;
pub mod perfil;
pub mod planes;
pub mod recuperar;
pub mod usuarios;

pub use home::HomePage;
pub use login::LoginPage;
pub use perfil::PerfilPage;
pub use recuperar::RecuperarPage;

pub mod anexo;
pub mod atividade;
pub mod cliente;
pub mod comentario;
pub mod log_acao;
pub mod ordem_producao;
pub mod ordem_producao_item;
pub mod peca;
pub mod usuario;

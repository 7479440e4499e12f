pub mod anexos;
pub mod atividades;
pub mod clientes;
pub mod comentarios;
pub mod indicadores;
pub mod itens_op;
pub mod logs;
pub mod op_status;
pub mod ordens_producao;
pub mod pecas;
pub mod usuarios;

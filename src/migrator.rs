use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250210_000001_create_usuarios_table::Migration),
            Box::new(m20250210_000002_create_clientes_table::Migration),
            Box::new(m20250210_000003_create_ordens_producao_table::Migration),
            Box::new(m20250210_000004_create_pecas_table::Migration),
            Box::new(m20250210_000005_create_ordens_producao_itens_table::Migration),
            Box::new(m20250210_000006_create_atividades_table::Migration),
            Box::new(m20250210_000007_create_comentarios_table::Migration),
            Box::new(m20250210_000008_create_anexos_table::Migration),
            Box::new(m20250210_000009_create_logs_acao_table::Migration),
        ]
    }
}

mod m20250210_000001_create_usuarios_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000001_create_usuarios_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Usuarios::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Usuarios::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Usuarios::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Usuarios::FirstName).string().null())
                        .col(ColumnDef::new(Usuarios::LastName).string().null())
                        .col(
                            ColumnDef::new(Usuarios::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Usuarios::IsStaff)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Usuarios::IsSuperuser)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Usuarios::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Usuarios::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_usuarios_is_active")
                        .table(Usuarios::Table)
                        .col(Usuarios::IsActive)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Usuarios::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Usuarios {
        Table,
        Id,
        Email,
        FirstName,
        LastName,
        IsActive,
        IsStaff,
        IsSuperuser,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250210_000002_create_clientes_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000002_create_clientes_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Clientes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Clientes::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Clientes::Nome).string().not_null())
                        .col(ColumnDef::new(Clientes::Contato).string().null())
                        .col(ColumnDef::new(Clientes::Email).string().null())
                        .col(ColumnDef::new(Clientes::Endereco).text().null())
                        .col(
                            ColumnDef::new(Clientes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Clientes::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_clientes_nome")
                        .table(Clientes::Table)
                        .col(Clientes::Nome)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Clientes::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Clientes {
        Table,
        Id,
        Nome,
        Contato,
        Email,
        Endereco,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250210_000003_create_ordens_producao_table {
    use sea_orm_migration::prelude::*;

    use super::m20250210_000001_create_usuarios_table::Usuarios;
    use super::m20250210_000002_create_clientes_table::Clientes;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000003_create_ordens_producao_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrdensProducao::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdensProducao::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdensProducao::Codigo)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(OrdensProducao::ClienteId).uuid().not_null())
                        .col(ColumnDef::new(OrdensProducao::CriadoPor).uuid().null())
                        .col(ColumnDef::new(OrdensProducao::Responsavel).uuid().null())
                        .col(
                            ColumnDef::new(OrdensProducao::DataInicioPrevista)
                                .date()
                                .null(),
                        )
                        .col(ColumnDef::new(OrdensProducao::DataFimPrevista).date().null())
                        .col(
                            ColumnDef::new(OrdensProducao::Status)
                                .string_len(30)
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrdensProducao::Observacoes).text().null())
                        .col(
                            ColumnDef::new(OrdensProducao::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdensProducao::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ordens_producao_cliente")
                                .from(OrdensProducao::Table, OrdensProducao::ClienteId)
                                .to(Clientes::Table, Clientes::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ordens_producao_criado_por")
                                .from(OrdensProducao::Table, OrdensProducao::CriadoPor)
                                .to(Usuarios::Table, Usuarios::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ordens_producao_responsavel")
                                .from(OrdensProducao::Table, OrdensProducao::Responsavel)
                                .to(Usuarios::Table, Usuarios::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_ordens_producao_status")
                        .table(OrdensProducao::Table)
                        .col(OrdensProducao::Status)
                        .to_owned(),
                )
                .await?;

            // Período + status, usado pelos indicadores
            manager
                .create_index(
                    Index::create()
                        .name("idx_ordens_producao_fim_prevista_status")
                        .table(OrdensProducao::Table)
                        .col(OrdensProducao::DataFimPrevista)
                        .col(OrdensProducao::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrdensProducao::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum OrdensProducao {
        Table,
        Id,
        Codigo,
        ClienteId,
        CriadoPor,
        Responsavel,
        DataInicioPrevista,
        DataFimPrevista,
        Status,
        Observacoes,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250210_000004_create_pecas_table {
    use sea_orm_migration::prelude::*;

    use super::m20250210_000002_create_clientes_table::Clientes;
    use super::m20250210_000003_create_ordens_producao_table::OrdensProducao;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000004_create_pecas_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Pecas::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Pecas::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Pecas::OrdemProducaoId).uuid().null())
                        .col(ColumnDef::new(Pecas::ClienteId).uuid().not_null())
                        .col(
                            ColumnDef::new(Pecas::Codigo)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Pecas::Descricao).text().null())
                        .col(ColumnDef::new(Pecas::Pedido).string_len(100).null())
                        .col(ColumnDef::new(Pecas::Quantidade).integer().not_null())
                        .col(ColumnDef::new(Pecas::DataEntrega).date().null())
                        .col(ColumnDef::new(Pecas::Status).string_len(30).not_null())
                        .col(ColumnDef::new(Pecas::Metadata).json().null())
                        .col(
                            ColumnDef::new(Pecas::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Pecas::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pecas_ordem_producao")
                                .from(Pecas::Table, Pecas::OrdemProducaoId)
                                .to(OrdensProducao::Table, OrdensProducao::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pecas_cliente")
                                .from(Pecas::Table, Pecas::ClienteId)
                                .to(Clientes::Table, Clientes::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_pecas_status")
                        .table(Pecas::Table)
                        .col(Pecas::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_pecas_data_entrega")
                        .table(Pecas::Table)
                        .col(Pecas::DataEntrega)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_pecas_cliente_status")
                        .table(Pecas::Table)
                        .col(Pecas::ClienteId)
                        .col(Pecas::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_pecas_ordem_producao")
                        .table(Pecas::Table)
                        .col(Pecas::OrdemProducaoId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Pecas::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Pecas {
        Table,
        Id,
        OrdemProducaoId,
        ClienteId,
        Codigo,
        Descricao,
        Pedido,
        Quantidade,
        DataEntrega,
        Status,
        Metadata,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250210_000005_create_ordens_producao_itens_table {
    use sea_orm_migration::prelude::*;

    use super::m20250210_000003_create_ordens_producao_table::OrdensProducao;
    use super::m20250210_000004_create_pecas_table::Pecas;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000005_create_ordens_producao_itens_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrdensProducaoItens::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrdensProducaoItens::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrdensProducaoItens::OrdemId).uuid().not_null())
                        .col(ColumnDef::new(OrdensProducaoItens::PecaId).uuid().not_null())
                        .col(
                            ColumnDef::new(OrdensProducaoItens::Quantidade)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdensProducaoItens::QuantidadeProduzida)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(OrdensProducaoItens::Status)
                                .string_len(30)
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrdensProducaoItens::Lote).string_len(100).null())
                        .col(
                            ColumnDef::new(OrdensProducaoItens::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrdensProducaoItens::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_op_itens_ordem")
                                .from(OrdensProducaoItens::Table, OrdensProducaoItens::OrdemId)
                                .to(OrdensProducao::Table, OrdensProducao::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_op_itens_peca")
                                .from(OrdensProducaoItens::Table, OrdensProducaoItens::PecaId)
                                .to(Pecas::Table, Pecas::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_op_itens_ordem_status")
                        .table(OrdensProducaoItens::Table)
                        .col(OrdensProducaoItens::OrdemId)
                        .col(OrdensProducaoItens::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_op_itens_peca")
                        .table(OrdensProducaoItens::Table)
                        .col(OrdensProducaoItens::PecaId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrdensProducaoItens::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum OrdensProducaoItens {
        Table,
        Id,
        OrdemId,
        PecaId,
        Quantidade,
        QuantidadeProduzida,
        Status,
        Lote,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250210_000006_create_atividades_table {
    use sea_orm_migration::prelude::*;

    use super::m20250210_000001_create_usuarios_table::Usuarios;
    use super::m20250210_000003_create_ordens_producao_table::OrdensProducao;
    use super::m20250210_000004_create_pecas_table::Pecas;
    use super::m20250210_000005_create_ordens_producao_itens_table::OrdensProducaoItens;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000006_create_atividades_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Atividades::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Atividades::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Atividades::Titulo).string_len(200).not_null())
                        .col(ColumnDef::new(Atividades::Descricao).text().null())
                        .col(ColumnDef::new(Atividades::Responsavel).uuid().null())
                        .col(ColumnDef::new(Atividades::OrdemId).uuid().null())
                        .col(ColumnDef::new(Atividades::OrdemItemId).uuid().null())
                        .col(ColumnDef::new(Atividades::PecaId).uuid().null())
                        .col(ColumnDef::new(Atividades::Status).string_len(30).not_null())
                        .col(
                            ColumnDef::new(Atividades::Prioridade)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Atividades::DataInicio)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Atividades::DataFim)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(Atividades::Posicao).integer().null())
                        .col(ColumnDef::new(Atividades::Metadata).json().null())
                        .col(
                            ColumnDef::new(Atividades::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Atividades::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_atividades_responsavel")
                                .from(Atividades::Table, Atividades::Responsavel)
                                .to(Usuarios::Table, Usuarios::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_atividades_ordem")
                                .from(Atividades::Table, Atividades::OrdemId)
                                .to(OrdensProducao::Table, OrdensProducao::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_atividades_ordem_item")
                                .from(Atividades::Table, Atividades::OrdemItemId)
                                .to(OrdensProducaoItens::Table, OrdensProducaoItens::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_atividades_peca")
                                .from(Atividades::Table, Atividades::PecaId)
                                .to(Pecas::Table, Pecas::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_atividades_status")
                        .table(Atividades::Table)
                        .col(Atividades::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_atividades_responsavel_status")
                        .table(Atividades::Table)
                        .col(Atividades::Responsavel)
                        .col(Atividades::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_atividades_ordem_status")
                        .table(Atividades::Table)
                        .col(Atividades::OrdemId)
                        .col(Atividades::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_atividades_prioridade")
                        .table(Atividades::Table)
                        .col(Atividades::Prioridade)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Atividades::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Atividades {
        Table,
        Id,
        Titulo,
        Descricao,
        Responsavel,
        OrdemId,
        OrdemItemId,
        PecaId,
        Status,
        Prioridade,
        DataInicio,
        DataFim,
        Posicao,
        Metadata,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250210_000007_create_comentarios_table {
    use sea_orm_migration::prelude::*;

    use super::m20250210_000001_create_usuarios_table::Usuarios;
    use super::m20250210_000006_create_atividades_table::Atividades;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000007_create_comentarios_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Comentarios::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Comentarios::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Comentarios::AtividadeId).uuid().not_null())
                        .col(ColumnDef::new(Comentarios::AutorId).uuid().null())
                        .col(ColumnDef::new(Comentarios::Texto).text().not_null())
                        .col(
                            ColumnDef::new(Comentarios::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_comentarios_atividade")
                                .from(Comentarios::Table, Comentarios::AtividadeId)
                                .to(Atividades::Table, Atividades::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_comentarios_autor")
                                .from(Comentarios::Table, Comentarios::AutorId)
                                .to(Usuarios::Table, Usuarios::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_comentarios_atividade_created_at")
                        .table(Comentarios::Table)
                        .col(Comentarios::AtividadeId)
                        .col(Comentarios::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Comentarios::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Comentarios {
        Table,
        Id,
        AtividadeId,
        AutorId,
        Texto,
        CreatedAt,
    }
}

mod m20250210_000008_create_anexos_table {
    use sea_orm_migration::prelude::*;

    use super::m20250210_000001_create_usuarios_table::Usuarios;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000008_create_anexos_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Anexos::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Anexos::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Anexos::AlvoTipo).string_len(30).not_null())
                        .col(ColumnDef::new(Anexos::AlvoId).uuid().not_null())
                        .col(ColumnDef::new(Anexos::ArquivoPath).string_len(512).not_null())
                        .col(ColumnDef::new(Anexos::NomeOriginal).string_len(255).null())
                        .col(ColumnDef::new(Anexos::MimeType).string_len(100).null())
                        .col(ColumnDef::new(Anexos::Tamanho).big_integer().null())
                        .col(ColumnDef::new(Anexos::Metadata).json().null())
                        .col(ColumnDef::new(Anexos::CriadoPor).uuid().null())
                        .col(
                            ColumnDef::new(Anexos::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_anexos_criado_por")
                                .from(Anexos::Table, Anexos::CriadoPor)
                                .to(Usuarios::Table, Usuarios::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_anexos_alvo")
                        .table(Anexos::Table)
                        .col(Anexos::AlvoTipo)
                        .col(Anexos::AlvoId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_anexos_criado_por")
                        .table(Anexos::Table)
                        .col(Anexos::CriadoPor)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Anexos::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Anexos {
        Table,
        Id,
        AlvoTipo,
        AlvoId,
        ArquivoPath,
        NomeOriginal,
        MimeType,
        Tamanho,
        Metadata,
        CriadoPor,
        CreatedAt,
    }
}

mod m20250210_000009_create_logs_acao_table {
    use sea_orm_migration::prelude::*;

    use super::m20250210_000001_create_usuarios_table::Usuarios;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250210_000009_create_logs_acao_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(LogsAcao::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(LogsAcao::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(LogsAcao::UsuarioId).uuid().null())
                        .col(ColumnDef::new(LogsAcao::Acao).string_len(100).not_null())
                        .col(ColumnDef::new(LogsAcao::AlvoTipo).string_len(100).null())
                        .col(ColumnDef::new(LogsAcao::AlvoId).uuid().null())
                        .col(ColumnDef::new(LogsAcao::Detalhes).json().null())
                        .col(
                            ColumnDef::new(LogsAcao::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_logs_acao_usuario")
                                .from(LogsAcao::Table, LogsAcao::UsuarioId)
                                .to(Usuarios::Table, Usuarios::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_logs_acao_usuario_created_at")
                        .table(LogsAcao::Table)
                        .col(LogsAcao::UsuarioId)
                        .col(LogsAcao::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_logs_acao_acao")
                        .table(LogsAcao::Table)
                        .col(LogsAcao::Acao)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_logs_acao_alvo")
                        .table(LogsAcao::Table)
                        .col(LogsAcao::AlvoTipo)
                        .col(LogsAcao::AlvoId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(LogsAcao::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum LogsAcao {
        Table,
        Id,
        UsuarioId,
        Acao,
        AlvoTipo,
        AlvoId,
        Detalhes,
        CreatedAt,
    }
}

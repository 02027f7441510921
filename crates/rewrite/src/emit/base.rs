// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Base trait providing shared serialization for all emitters

use sqlany_dialect_ir::{
    Expr, Join, JoinCondition, JoinType, Literal, Lock, OrderBy, SelectCore, SelectItem,
    SelectStatement, TableFactor, TableRef, UnaryOp,
};

use crate::context::RewriteContext;
use crate::error::RewriteResult;

/// Base trait providing shared serialization logic
///
/// Implementors supply [`EmitterBase::emit_statement`], which decides where
/// the dialect puts `DISTINCT`, row limiting and ordering. Everything below
/// the statement level (expressions, projections, sources, cores) is shared.
pub trait EmitterBase {
    /// Serialize a full statement
    fn emit_statement(
        &self,
        ctx: &mut RewriteContext,
        statement: &SelectStatement,
    ) -> RewriteResult<String>;

    /// Serialize a nested statement in parentheses, one level deeper
    fn render_subquery(
        &self,
        ctx: &mut RewriteContext,
        statement: &SelectStatement,
    ) -> RewriteResult<String> {
        ctx.enter_recursive_context()?;
        let result = self.emit_statement(ctx, statement);
        ctx.exit_recursive_context();
        Ok(format!("({})", result?))
    }

    fn render_literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Null => "NULL".to_string(),
            Literal::Boolean(true) => "TRUE".to_string(),
            Literal::Boolean(false) => "FALSE".to_string(),
            Literal::Integer(value) => value.to_string(),
            Literal::Float(value) => value.to_string(),
            Literal::String(value) => format!("'{}'", value.replace('\'', "''")),
        }
    }

    fn render_expr(&self, ctx: &mut RewriteContext, expr: &Expr) -> RewriteResult<String> {
        Ok(match expr {
            Expr::Column(column) => column.qualified(),
            Expr::Literal(literal) => self.render_literal(literal),
            Expr::BinaryOp { left, op, right } => format!(
                "{} {} {}",
                self.render_expr(ctx, left)?,
                op.as_sql(),
                self.render_expr(ctx, right)?
            ),
            Expr::UnaryOp { op, expr } => {
                let operand = self.render_expr(ctx, expr)?;
                match op {
                    UnaryOp::Neg => format!("-{}", operand),
                    UnaryOp::Not => format!("NOT {}", operand),
                    UnaryOp::Exists => format!("EXISTS {}", operand),
                }
            }
            Expr::Function {
                name,
                args,
                distinct,
            } => {
                let args = self.render_list(ctx, args)?;
                if *distinct {
                    format!("{}(DISTINCT {})", name, args)
                } else {
                    format!("{}({})", name, args)
                }
            }
            Expr::Cast { expr, type_name } => {
                format!("CAST({} AS {})", self.render_expr(ctx, expr)?, type_name)
            }
            Expr::Paren(inner) => format!("({})", self.render_expr(ctx, inner)?),
            Expr::List(items) => format!("({})", self.render_list(ctx, items)?),
            Expr::Subquery(statement) => self.render_subquery(ctx, statement)?,
            Expr::Raw(sql) => sql.clone(),
        })
    }

    /// Comma-separated expressions
    fn render_list(&self, ctx: &mut RewriteContext, exprs: &[Expr]) -> RewriteResult<String> {
        let rendered = exprs
            .iter()
            .map(|expr| self.render_expr(ctx, expr))
            .collect::<RewriteResult<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    fn render_item(&self, ctx: &mut RewriteContext, item: &SelectItem) -> RewriteResult<String> {
        Ok(match item {
            SelectItem::UnnamedExpr(expr) => self.render_expr(ctx, expr)?,
            SelectItem::AliasedExpr { expr, alias } => {
                format!("{} AS {}", self.render_expr(ctx, expr)?, alias)
            }
            SelectItem::QualifiedWildcard(table) => format!("{}.*", table),
            SelectItem::Wildcard => "*".to_string(),
        })
    }

    /// Projection list without the DISTINCT marker
    fn render_projections(
        &self,
        ctx: &mut RewriteContext,
        items: &[SelectItem],
    ) -> RewriteResult<String> {
        let rendered = items
            .iter()
            .map(|item| self.render_item(ctx, item))
            .collect::<RewriteResult<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    fn render_table_ref(&self, ctx: &mut RewriteContext, table: &TableRef) -> RewriteResult<String> {
        let mut sql = match &table.factor {
            TableFactor::Table { name, alias } => with_alias(name.clone(), alias.as_deref()),
            TableFactor::Derived { subquery, alias } => {
                with_alias(self.render_subquery(ctx, subquery)?, alias.as_deref())
            }
            TableFactor::Raw(sql) => sql.clone(),
        };
        for join in &table.joins {
            sql.push(' ');
            sql.push_str(&self.render_join(ctx, join)?);
        }
        Ok(sql)
    }

    fn render_join(&self, ctx: &mut RewriteContext, join: &Join) -> RewriteResult<String> {
        let keyword = match join.join_type {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT OUTER JOIN",
            JoinType::Right => "RIGHT OUTER JOIN",
            JoinType::Full => "FULL OUTER JOIN",
            JoinType::Cross => "CROSS JOIN",
        };
        let table = self.render_table_ref(ctx, &join.table)?;
        Ok(match &join.condition {
            JoinCondition::On(predicate) => {
                format!("{} {} ON {}", keyword, table, self.render_expr(ctx, predicate)?)
            }
            JoinCondition::Using(columns) => {
                format!("{} {} USING ({})", keyword, table, columns.join(", "))
            }
            JoinCondition::Natural => format!("NATURAL {} {}", keyword, table),
            JoinCondition::None => format!("{} {}", keyword, table),
        })
    }

    /// Everything a core contributes after the statement header
    fn render_core(&self, ctx: &mut RewriteContext, core: &SelectCore) -> RewriteResult<String> {
        let mut parts = vec![self.render_projections(ctx, &core.projections)?];

        if !core.from.is_empty() {
            let sources = core
                .from
                .iter()
                .map(|table| self.render_table_ref(ctx, table))
                .collect::<RewriteResult<Vec<_>>>()?;
            parts.push(format!("FROM {}", sources.join(", ")));
        }
        if !core.wheres.is_empty() {
            let predicates = core
                .wheres
                .iter()
                .map(|predicate| self.render_expr(ctx, predicate))
                .collect::<RewriteResult<Vec<_>>>()?;
            parts.push(format!("WHERE {}", predicates.join(" AND ")));
        }
        if !core.groups.is_empty() {
            parts.push(format!("GROUP BY {}", self.render_list(ctx, &core.groups)?));
        }
        if let Some(having) = &core.having {
            parts.push(format!("HAVING {}", self.render_expr(ctx, having)?));
        }

        Ok(join_parts(parts))
    }

    fn render_order(&self, ctx: &mut RewriteContext, order: &OrderBy) -> RewriteResult<String> {
        let expr = self.render_expr(ctx, &order.expr)?;
        Ok(match order.direction {
            Some(direction) => format!("{} {}", expr, direction.as_sql()),
            None => expr,
        })
    }

    fn render_orders(&self, ctx: &mut RewriteContext, orders: &[OrderBy]) -> RewriteResult<String> {
        let rendered = orders
            .iter()
            .map(|order| self.render_order(ctx, order))
            .collect::<RewriteResult<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }

    fn render_lock(&self, lock: &Lock) -> String {
        match lock {
            Lock::ForUpdate => "FOR UPDATE".to_string(),
            Lock::Raw(sql) => sql.clone(),
        }
    }
}

fn with_alias(source: String, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{} {}", source, alias),
        None => source,
    }
}

/// Join non-empty clause fragments with single spaces
pub(crate) fn join_parts(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
